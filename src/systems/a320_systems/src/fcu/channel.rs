use super::input::FcuChannelInput;
use super::parameters::FcuParameters;
use enum_dispatch::enum_dispatch;
use log::{info, warn};
use std::time::Duration;

#[enum_dispatch]
pub(super) trait ChannelSupervision {
    fn transition(
        &self,
        delta: Duration,
        powered: bool,
        parameters: &FcuParameters,
    ) -> ChannelState;

    /// The program is stopped after a power outage longer than the fault threshold.
    fn power_faulted(&self) -> bool;

    fn self_test_complete(&self) -> bool;
}

/// Outage time since power was last present.
fn outage_after(outage: Duration, delta: Duration, powered: bool) -> Duration {
    if powered {
        Duration::ZERO
    } else {
        outage + delta
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Unpowered;

impl ChannelSupervision for Unpowered {
    fn transition(
        &self,
        delta: Duration,
        powered: bool,
        parameters: &FcuParameters,
    ) -> ChannelState {
        if powered {
            SelfTesting {
                remaining: parameters.self_test_duration(),
                outage: Duration::ZERO,
            }
            .count_down(delta)
        } else {
            Unpowered.into()
        }
    }

    fn power_faulted(&self) -> bool {
        true
    }

    fn self_test_complete(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct SelfTesting {
    remaining: Duration,
    outage: Duration,
}

impl SelfTesting {
    fn count_down(self, delta: Duration) -> ChannelState {
        let remaining = self.remaining.saturating_sub(delta);
        if remaining == Duration::ZERO {
            Healthy {
                outage: self.outage,
            }
            .into()
        } else {
            SelfTesting { remaining, ..self }.into()
        }
    }
}

impl ChannelSupervision for SelfTesting {
    fn transition(
        &self,
        delta: Duration,
        powered: bool,
        parameters: &FcuParameters,
    ) -> ChannelState {
        let outage = outage_after(self.outage, delta, powered);
        if outage > parameters.power_outage_fault_threshold() {
            Unpowered.into()
        } else {
            SelfTesting { outage, ..*self }.count_down(delta)
        }
    }

    fn power_faulted(&self) -> bool {
        false
    }

    fn self_test_complete(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Healthy {
    outage: Duration,
}

impl ChannelSupervision for Healthy {
    fn transition(
        &self,
        delta: Duration,
        powered: bool,
        parameters: &FcuParameters,
    ) -> ChannelState {
        let outage = outage_after(self.outage, delta, powered);
        if outage > parameters.power_outage_fault_threshold() {
            Unpowered.into()
        } else {
            Healthy { outage }.into()
        }
    }

    fn power_faulted(&self) -> bool {
        false
    }

    fn self_test_complete(&self) -> bool {
        true
    }
}

/// Power supervision of one FCU channel. A short power outage is bridged, a longer one stops the
/// program until power returns, after which the channel runs its self-test before being usable.
#[enum_dispatch(ChannelSupervision)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum ChannelState {
    Unpowered(Unpowered),
    SelfTesting(SelfTesting),
    Healthy(Healthy),
}

pub(super) struct FcuChannel {
    number: usize,
    state: ChannelState,
    healthy: bool,
}

impl FcuChannel {
    /// Channels start without power, so the first powered frame begins a self-test.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            state: Unpowered.into(),
            healthy: false,
        }
    }

    pub fn update(&mut self, delta: Duration, input: &FcuChannelInput, parameters: &FcuParameters) {
        let state = self.state.transition(delta, input.powered, parameters);
        if state.power_faulted() && !self.state.power_faulted() {
            warn!("FCU channel {} power supply fault", self.number);
        }
        if state.self_test_complete() && !self.state.self_test_complete() {
            info!("FCU channel {} self-test complete", self.number);
        }
        self.state = state;

        self.healthy = !self.state.power_faulted()
            && self.state.self_test_complete()
            && !input.fault_active;
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    pub fn power_faulted(&self) -> bool {
        self.state.power_faulted()
    }

    pub fn self_test_complete(&self) -> bool {
        self.state.self_test_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FRAME: Duration = Duration::from_millis(10);

    fn powered() -> FcuChannelInput {
        FcuChannelInput::default()
    }

    fn unpowered() -> FcuChannelInput {
        FcuChannelInput {
            powered: false,
            fault_active: false,
        }
    }

    fn healthy_channel(parameters: &FcuParameters) -> FcuChannel {
        let mut channel = FcuChannel::new(1);
        channel.update(Duration::from_secs(4), &powered(), parameters);
        assert!(channel.is_healthy());
        channel
    }

    #[test]
    fn when_created_is_faulted() {
        let channel = FcuChannel::new(1);

        assert!(channel.power_faulted());
        assert!(!channel.is_healthy());
    }

    #[test]
    fn when_first_powered_runs_self_test() {
        let parameters = FcuParameters::default();
        let mut channel = FcuChannel::new(1);

        channel.update(FRAME, &powered(), &parameters);

        assert!(!channel.power_faulted());
        assert!(!channel.self_test_complete());
        assert!(!channel.is_healthy());
    }

    #[test]
    fn when_self_test_elapses_becomes_healthy() {
        let parameters = FcuParameters::default();
        let mut channel = FcuChannel::new(1);

        for _ in 0..399 {
            channel.update(FRAME, &powered(), &parameters);
        }
        assert!(!channel.self_test_complete());

        channel.update(FRAME, &powered(), &parameters);
        assert!(channel.self_test_complete());
        assert!(channel.is_healthy());
    }

    #[rstest]
    #[case(19, false)]
    #[case(20, false)]
    #[case(21, true)]
    fn when_power_lost_faults_after_threshold(#[case] outage_ms: u64, #[case] faulted: bool) {
        let parameters = FcuParameters::default();
        let mut channel = healthy_channel(&parameters);

        channel.update(Duration::from_millis(outage_ms), &unpowered(), &parameters);

        assert_eq!(channel.power_faulted(), faulted);
        assert_eq!(channel.is_healthy(), !faulted);
    }

    #[test]
    fn when_short_outages_repeat_does_not_fault() {
        let parameters = FcuParameters::default();
        let mut channel = healthy_channel(&parameters);

        for _ in 0..10 {
            channel.update(Duration::from_millis(15), &unpowered(), &parameters);
            channel.update(FRAME, &powered(), &parameters);
        }

        assert!(channel.is_healthy());
    }

    #[test]
    fn when_power_restored_after_fault_reruns_self_test() {
        let parameters = FcuParameters::default();
        let mut channel = healthy_channel(&parameters);

        channel.update(Duration::from_millis(50), &unpowered(), &parameters);
        channel.update(FRAME, &powered(), &parameters);
        assert!(!channel.power_faulted());
        assert!(!channel.self_test_complete());

        channel.update(Duration::from_millis(3980), &powered(), &parameters);
        assert!(!channel.self_test_complete());

        channel.update(FRAME, &powered(), &parameters);
        assert!(channel.is_healthy());
    }

    #[test]
    fn when_fault_active_is_not_healthy() {
        let parameters = FcuParameters::default();
        let mut channel = healthy_channel(&parameters);

        channel.update(
            FRAME,
            &FcuChannelInput {
                powered: true,
                fault_active: true,
            },
            &parameters,
        );

        assert!(!channel.is_healthy());
        assert!(!channel.power_faulted());
    }
}
