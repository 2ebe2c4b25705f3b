use serde::{Deserialize, Serialize};

/// First and last data bit of an ARINC429 discrete word. Bits 1 to 10 carry the label and SDI,
/// which are not represented in the data field.
const FIRST_DISCRETE_BIT: u8 = 11;
const LAST_DISCRETE_BIT: u8 = 29;

#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Arinc429Word<T: Copy> {
    value: T,
    ssm: SignStatus,
}

impl<T: Copy> Arinc429Word<T> {
    pub fn new(value: T, ssm: SignStatus) -> Self {
        Self { value, ssm }
    }

    pub fn new_norm(value: T) -> Self {
        Self {
            value,
            ssm: SignStatus::NormalOperation,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn ssm(&self) -> SignStatus {
        self.ssm
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.ssm, SignStatus::NormalOperation)
    }

    /// Returns the carried value when the word is in normal operation, the given default
    /// otherwise.
    pub fn value_or_default(&self, default: T) -> T {
        if self.is_normal() {
            self.value
        } else {
            default
        }
    }
}

impl<T: Copy + Default> Default for Arinc429Word<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            ssm: SignStatus::default(),
        }
    }
}

impl Arinc429Word<f64> {
    /// Reads a single bit of a discrete word, bit 1 being the least significant one. The stored
    /// data is rounded half to even and saturated into the u32 range before the bit is read, which
    /// is how the discrete words produced by the guidance computers are packed.
    pub fn bit(&self, bit_number: u8) -> bool {
        let data = self.value.round_ties_even() as u32;
        match bit_number.checked_sub(1) {
            Some(shift) if shift < 32 => (data >> shift) & 1 == 1,
            _ => false,
        }
    }

    /// Like [`Arinc429Word::bit`], but only when the word is valid.
    pub fn bit_if_normal(&self, bit_number: u8) -> bool {
        self.is_normal() && self.bit(bit_number)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignStatus {
    FailureWarning,
    FunctionalTest,
    NoComputedData,
    NormalOperation,
}

impl Default for SignStatus {
    fn default() -> Self {
        SignStatus::FailureWarning
    }
}

impl From<SignStatus> for u64 {
    fn from(value: SignStatus) -> Self {
        match value {
            SignStatus::FailureWarning => 0b00,
            SignStatus::FunctionalTest => 0b01,
            SignStatus::NoComputedData => 0b10,
            SignStatus::NormalOperation => 0b11,
        }
    }
}

impl From<u32> for SignStatus {
    /// Only the two least significant bits are considered.
    fn from(value: u32) -> Self {
        match value & 0b11 {
            0b00 => SignStatus::FailureWarning,
            0b01 => SignStatus::FunctionalTest,
            0b10 => SignStatus::NoComputedData,
            _ => SignStatus::NormalOperation,
        }
    }
}

#[derive(Default)]
pub struct Arinc429DiscretesWordBuilder {
    value: [bool; 19],
}

impl Arinc429DiscretesWordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one of the data bits 11 to 29. Any other bit number is ignored.
    pub fn set(&mut self, bit: u8, value: bool) -> &mut Self {
        if (FIRST_DISCRETE_BIT..=LAST_DISCRETE_BIT).contains(&bit) {
            self.value[(bit - FIRST_DISCRETE_BIT) as usize] = value;
        }
        self
    }

    pub fn build(&self, ssm: SignStatus) -> Arinc429Word<f64> {
        let data = self
            .value
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .fold(0_u32, |data, (index, _)| {
                data | 1 << (index as u32 + FIRST_DISCRETE_BIT as u32 - 1)
            });

        Arinc429Word::new(data as f64, ssm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::Rng;
    use rstest::rstest;

    fn word_with_bit(bit: u8) -> Arinc429Word<f64> {
        Arinc429Word::new_norm(2_f64.powi(bit as i32 - 1))
    }

    #[rstest]
    #[case(SignStatus::FailureWarning, 0b00)]
    #[case(SignStatus::FunctionalTest, 0b01)]
    #[case(SignStatus::NoComputedData, 0b10)]
    #[case(SignStatus::NormalOperation, 0b11)]
    fn sign_status_conversion_is_symmetric(#[case] ssm: SignStatus, #[case] raw: u32) {
        let encoded: u64 = ssm.into();

        assert_eq!(encoded, raw as u64);
        assert_eq!(SignStatus::from(raw), ssm);
    }

    #[rstest]
    #[case(SignStatus::FailureWarning)]
    #[case(SignStatus::FunctionalTest)]
    #[case(SignStatus::NoComputedData)]
    fn value_or_default_substitutes_invalid_data(#[case] ssm: SignStatus) {
        let mut rng = rand::thread_rng();
        let value: f64 = rng.gen_range(0.0..10000.0);

        let word = Arinc429Word::new(value, ssm);

        assert!(!word.is_normal());
        assert_eq!(word.value_or_default(-1.), -1.);
    }

    #[test]
    fn value_or_default_passes_normal_data() {
        let word = Arinc429Word::new_norm(250.);

        assert!(word.is_normal());
        assert_eq!(word.value_or_default(0.), 250.);
    }

    #[test]
    fn default_word_is_failure_warning_with_zero_data() {
        let word: Arinc429Word<f64> = Default::default();

        assert_eq!(word.ssm(), SignStatus::FailureWarning);
        assert_eq!(word.value(), 0.);
    }

    #[test]
    fn bit_extraction_isolates_each_bit() {
        for k in 1..=32 {
            let word = word_with_bit(k);
            for j in 1..=32 {
                assert_eq!(word.bit(j), j == k, "bit {} of word with bit {}", j, k);
            }
        }
    }

    #[rstest]
    #[case(0)]
    #[case(33)]
    #[case(255)]
    fn out_of_range_bits_read_as_zero(#[case] bit: u8) {
        let word = Arinc429Word::new_norm(u32::MAX as f64);

        assert!(!word.bit(bit));
    }

    #[rstest]
    #[case(0.5, false)]
    #[case(1.5, false)]
    #[case(2.5, false)]
    #[case(3.5, false)]
    #[case(0.6, true)]
    #[case(2.4, false)]
    fn bit_extraction_rounds_half_to_even(#[case] data: f64, #[case] expected_bit_1: bool) {
        assert_eq!(Arinc429Word::new_norm(data).bit(1), expected_bit_1);
    }

    #[test]
    fn negative_data_reads_as_zero() {
        let word = Arinc429Word::new_norm(-1.);

        assert!((1..=32).all(|bit| !word.bit(bit)));
    }

    #[test]
    fn huge_data_saturates() {
        let word = Arinc429Word::new_norm(1e12);

        assert!((1..=32).all(|bit| word.bit(bit)));
    }

    #[test]
    fn bit_if_normal_ignores_invalid_words() {
        let word = Arinc429Word::new(1., SignStatus::NoComputedData);

        assert!(word.bit(1));
        assert!(!word.bit_if_normal(1));
    }

    #[test]
    fn discretes_builder_packs_data_bits() {
        let word = Arinc429DiscretesWordBuilder::new()
            .set(11, true)
            .set(20, true)
            .set(29, true)
            .build(SignStatus::NormalOperation);

        assert!(word.is_normal());
        assert!(word.bit(11));
        assert!(word.bit(20));
        assert!(word.bit(29));
        assert!((1..=32)
            .filter(|bit| ![11, 20, 29].contains(bit))
            .all(|bit| !word.bit(bit)));
    }

    #[test]
    fn discretes_builder_ignores_label_bits() {
        let word = Arinc429DiscretesWordBuilder::new()
            .set(1, true)
            .set(10, true)
            .set(30, true)
            .build(SignStatus::NormalOperation);

        assert_eq!(word.value(), 0.);
    }

    proptest! {
        #[test]
        fn discretes_builder_output_reads_back(bits in prop::collection::vec(any::<bool>(), 19)) {
            let mut builder = Arinc429DiscretesWordBuilder::new();
            for (index, &set) in bits.iter().enumerate() {
                builder.set(index as u8 + 11, set);
            }
            let word = builder.build(SignStatus::NormalOperation);

            for (index, &set) in bits.iter().enumerate() {
                prop_assert_eq!(word.bit(index as u8 + 11), set);
            }
        }
    }
}
