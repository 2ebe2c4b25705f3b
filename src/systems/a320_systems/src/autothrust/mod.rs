use engagement::{Engagement, ThrustReductionInhibit};
use levers::{ThrustLevers, MCT_DETENT};
use log::info;
use mode::{mode_message, LeverWarnings, ModeSelection, ThrustLock};
use thrust::{
    n1_from_tla, thrust_limit, N1Command, N1CommandSource, ThrottleLeverPosition, ThrustMemo,
};
use uom::si::{angle::degree, f64::*, ratio::percent};

mod engagement;
mod input;
mod levers;
mod mode;
mod output;
mod parameters;
mod thrust;

pub use input::{AutothrustDiscretes, AutothrustInput, ModeRequest, ThrustLimits};
pub use output::{
    AutothrustMode, AutothrustModeMessage, AutothrustOutput, AutothrustStatus, ThrustLeverRegion,
    ThrustLimitType,
};
pub use parameters::AutothrustParameters;

pub type A320Autothrust = Autothrust<2>;
pub type A380Autothrust = Autothrust<4>;

struct AutothrustRuntime<const ENGINES: usize> {
    engagement: Engagement<ENGINES>,
    mode_selection: ModeSelection,
    thrust_reduction_inhibit: ThrustReductionInhibit,
    thrust_lock: ThrustLock,
    thrust_memo: ThrustMemo,
    n1_command: N1Command,
    lever_positions: [ThrottleLeverPosition; ENGINES],
    lever_warnings: LeverWarnings,
}

impl<const ENGINES: usize> AutothrustRuntime<ENGINES> {
    fn new(parameters: &AutothrustParameters) -> Self {
        Self {
            engagement: Engagement::new(),
            mode_selection: ModeSelection::new(),
            thrust_reduction_inhibit: ThrustReductionInhibit::new(),
            thrust_lock: ThrustLock::new(),
            thrust_memo: ThrustMemo::new(),
            n1_command: N1Command::new(parameters),
            lever_positions: [(); ENGINES].map(|_| ThrottleLeverPosition::new()),
            lever_warnings: LeverWarnings::new(parameters),
        }
    }

    fn update(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        parameters: &AutothrustParameters,
    ) -> AutothrustOutput<ENGINES> {
        let levers = ThrustLevers::from(input);
        let engagement = self.engagement.update(input, &levers, parameters);
        let status = engagement.status;

        let mode = self
            .mode_selection
            .update(input, &levers, &engagement, parameters);
        let thrust_reduction_inhibited = self.thrust_reduction_inhibit.update(input);
        let thrust_locked = self.thrust_lock.update(input, &levers, status);

        let (thrust_limit_type, thrust_limit) = thrust_limit(
            &levers,
            engagement.on_ground,
            engagement.flex_active,
            mode,
            &input.thrust_limits,
        );

        let auto_thrust_control = status == AutothrustStatus::EngagedActive
            && (levers.all(|angle| angle <= MCT_DETENT) || input.discretes.alpha_floor_condition);
        let thrust_memo = self
            .thrust_memo
            .update(input, &levers, status, auto_thrust_control);
        let autothrust_n1 = self
            .n1_command
            .update(input, &levers, status, mode, parameters);
        let source = N1CommandSource::new(auto_thrust_control, thrust_memo);

        let mut output = AutothrustOutput {
            status,
            mode,
            mode_message: mode_message(
                input,
                &levers,
                &engagement,
                self.mode_selection.selected_mode(),
                thrust_reduction_inhibited,
                thrust_locked,
            ),
            thrust_limit_type,
            thrust_limit,
            flex_active: engagement.flex_active,
            tla_in_active_range: engagement.tla_in_active_range,
            athr_disabled: engagement.athr_disabled,
            alpha_floor_inhibited: engagement.alpha_floor_inhibited,
            on_ground: engagement.on_ground,
            ..Default::default()
        };

        for (engine, &tla) in levers.angles().iter().enumerate() {
            let (n1_tla, in_reverse) = n1_from_tla(
                tla,
                engagement.on_ground,
                engagement.flex_active,
                &input.thrust_limits,
            );
            let commanded_n1 = input.commanded_n1[engine].get::<percent>();
            let n1_command = source.engine_command(
                n1_tla,
                commanded_n1,
                autothrust_n1,
                mode,
                &input.thrust_limits,
            );

            output.n1_tla[engine] = Ratio::new::<percent>(n1_tla);
            output.n1_command[engine] = Ratio::new::<percent>(n1_command);
            output.in_reverse[engine] = in_reverse;
            output.thrust_lever_region[engine] =
                ThrustLeverRegion::from(input.thrust_lever_angle[engine].get::<degree>());
            output.sim_throttle_lever_position[engine] = self.lever_positions[engine].update(
                n1_command,
                commanded_n1,
                in_reverse,
                input.delta,
                parameters,
            );
        }

        let (flex_warning, toga_warning) =
            self.lever_warnings
                .update(input, &levers, engagement.flex_active);
        output.thrust_lever_warning_flex = flex_warning;
        output.thrust_lever_warning_toga = toga_warning;

        output
    }
}

/// The autothrust of an aircraft with `ENGINES` engines. It decides whether the autothrust is
/// engaged, selects its mode and thrust limit, and computes the N1 command of each engine.
pub struct Autothrust<const ENGINES: usize> {
    parameters: AutothrustParameters,
    input: AutothrustInput<ENGINES>,
    runtime: Option<AutothrustRuntime<ENGINES>>,
    output: AutothrustOutput<ENGINES>,
}

impl<const ENGINES: usize> Autothrust<ENGINES> {
    pub fn new(parameters: AutothrustParameters) -> Self {
        Self {
            parameters,
            input: AutothrustInput::default(),
            runtime: None,
            output: AutothrustOutput::default(),
        }
    }

    pub fn initialize(&mut self) {
        info!("Autothrust with {} engines initialized", ENGINES);
        self.runtime = Some(AutothrustRuntime::new(&self.parameters));
        self.output = AutothrustOutput::default();
    }

    pub fn set_inputs(&mut self, input: AutothrustInput<ENGINES>) {
        self.input = input;
    }

    pub fn step(&mut self) {
        let parameters = &self.parameters;
        let runtime = self
            .runtime
            .get_or_insert_with(|| AutothrustRuntime::new(parameters));
        self.output = runtime.update(&self.input, parameters);
    }

    pub fn outputs(&self) -> &AutothrustOutput<ENGINES> {
        &self.output
    }

    pub fn terminate(&mut self) {
        info!("Autothrust terminated");
        self.runtime = None;
    }
}

impl<const ENGINES: usize> Default for Autothrust<ENGINES> {
    fn default() -> Self {
        Self::new(AutothrustParameters::default())
    }
}
