use super::{FcuInput, FcuOutput, FlightControlUnit, FmgcBus};
use std::time::Duration;
use systems::shared::arinc429::{Arinc429DiscretesWordBuilder, Arinc429Word, SignStatus};

pub const FRAME: Duration = Duration::from_millis(50);

pub fn discrete_word(bits: &[u8]) -> Arinc429Word<f64> {
    let mut builder = Arinc429DiscretesWordBuilder::new();
    for &bit in bits {
        builder.set(bit, true);
    }
    builder.build(SignStatus::NormalOperation)
}

pub struct FcuTestBed {
    fcu: FlightControlUnit,
    input: FcuInput,
}

impl FcuTestBed {
    pub fn new() -> Self {
        let mut fcu = FlightControlUnit::default();
        fcu.initialize();
        let mut input = FcuInput::default();
        input.fmgc_1 = Self::valid_fmgc();
        input.fmgc_2 = Self::valid_fmgc();

        Self { fcu, input }
    }

    fn valid_fmgc() -> FmgcBus {
        FmgcBus {
            discrete_word_1: discrete_word(&[]),
            discrete_word_2: discrete_word(&[]),
            discrete_word_3: discrete_word(&[]),
            discrete_word_4: discrete_word(&[]),
            discrete_word_5: discrete_word(&[]),
            discrete_word_7: discrete_word(&[]),
            ats_discrete_word: discrete_word(&[]),
            ats_fma_discrete_word: discrete_word(&[]),
            ..Default::default()
        }
    }

    pub fn and(self) -> Self {
        self
    }

    pub fn output(&self) -> &FcuOutput {
        self.fcu.outputs()
    }

    pub fn is_running(&self) -> bool {
        self.fcu.is_running()
    }

    pub fn run(mut self, delta: Duration) -> Self {
        self.input.delta = delta;
        self.input.simulation_time += delta;
        self.fcu.set_inputs(self.input);
        self.fcu.step();
        self
    }

    pub fn run_for(mut self, duration: Duration) -> Self {
        let mut remaining = duration;
        while remaining > Duration::ZERO {
            let delta = remaining.min(FRAME);
            self = self.run(delta);
            remaining -= delta;
        }
        self
    }

    pub fn self_tested(self) -> Self {
        self.run_for(Duration::from_secs(4))
    }

    pub fn computer_running(mut self, running: bool) -> Self {
        self.input.computer_running = running;
        self
    }

    pub fn channel_powered(mut self, number: usize, powered: bool) -> Self {
        self.input.channels[number - 1].powered = powered;
        self
    }

    pub fn channel_failed(mut self, number: usize, failed: bool) -> Self {
        self.input.channels[number - 1].fault_active = failed;
        self
    }

    pub fn ap_1_engaged(mut self, engaged: bool) -> Self {
        self.input.discretes.ap_1_engaged = engaged;
        self
    }

    pub fn ap_2_engaged(mut self, engaged: bool) -> Self {
        self.input.discretes.ap_2_engaged = engaged;
        self
    }

    pub fn fd_1_engaged(mut self, engaged: bool) -> Self {
        self.input.discretes.fd_1_engaged = engaged;
        self
    }

    pub fn athr_2_engaged(mut self, engaged: bool) -> Self {
        self.input.discretes.athr_2_engaged = engaged;
        self
    }

    pub fn qfe_available(mut self) -> Self {
        self.input.discretes.pin_prog_qfe_avail = true;
        self
    }

    pub fn fmgc_1(mut self, update: impl FnOnce(&mut FmgcBus)) -> Self {
        update(&mut self.input.fmgc_1);
        self
    }

    pub fn fmgc_2(mut self, update: impl FnOnce(&mut FmgcBus)) -> Self {
        update(&mut self.input.fmgc_2);
        self
    }

    pub fn capt_baro_pulled(mut self, pulled: bool) -> Self {
        self.input.discretes.capt_efis.baro_knob.pulled = pulled;
        self
    }

    pub fn capt_baro_turns(mut self, turns: i8) -> Self {
        self.input.discretes.capt_efis.baro_knob.turns = turns;
        self
    }

    pub fn capt_baro_sync(mut self, hpa: Option<f64>) -> Self {
        self.input.capt_baro_sync_hpa = hpa;
        self
    }

    pub fn capt_fd_button_pushed(mut self, pushed: bool) -> Self {
        self.input.discretes.capt_efis.fd_button_pushed = pushed;
        self
    }

    pub fn capt_cstr_button_pushed(mut self, pushed: bool) -> Self {
        self.input.discretes.capt_efis.cstr_button_pushed = pushed;
        self
    }

    pub fn alt_knob_pulled(mut self, pulled: bool) -> Self {
        self.input.discretes.afs.alt_knob.pulled = pulled;
        self
    }

    pub fn hdg_knob_turns(mut self, turns: i8) -> Self {
        self.input.discretes.afs.hdg_trk_knob.turns = turns;
        self
    }
}

pub fn test_bed() -> FcuTestBed {
    FcuTestBed::new()
}
