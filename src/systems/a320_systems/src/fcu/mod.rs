use afs::{AfsModeLamps, AfsPanelLogic};
use channel::FcuChannel;
use efis::{EfisPanelLogic, FlightDirectorAutoSwitchingActivation};
use log::{info, warn};
use redundancy::{FmgcPriority, FmgcSelection};
use systems::shared::arinc429::{Arinc429DiscretesWordBuilder, Arinc429Word, SignStatus};

mod afs;
mod channel;
mod efis;
mod input;
mod output;
mod parameters;
mod redundancy;
#[cfg(test)]
mod test;

pub use input::{
    AfsPanelInput, EfisMode, EfisNavaid, EfisPanelInput, EfisRange, FcuChannelInput,
    FcuDiscreteInputs, FcuInput, FmgcBus, KnobInput,
};
pub use output::{
    AfsKnobOutputs, AfsOutputs, BaroDisplayMode, BaroReference, ChosenFmgcData, EfisFilter,
    EfisLights, EfisOutputs, FcuBusOutputs, FcuDiscreteOutputs, FcuLogicOutputs, FcuOutput,
    KnobActions,
};
pub use parameters::FcuParameters;

/// The software executed by the FCU. It only exists while the computer is running and is
/// recreated in its cold-start state when the computer starts again.
struct FcuRuntime {
    channels: [FcuChannel; 2],
    healthy: bool,
    fmgc_selection: FmgcSelection,
    afs: AfsPanelLogic,
    fd_auto_switching: FlightDirectorAutoSwitchingActivation,
    capt_efis: EfisPanelLogic,
    fo_efis: EfisPanelLogic,
    output: FcuOutput,
}

impl FcuRuntime {
    fn new(parameters: &FcuParameters) -> Self {
        Self {
            channels: [FcuChannel::new(1), FcuChannel::new(2)],
            healthy: false,
            fmgc_selection: FmgcSelection::default(),
            afs: AfsPanelLogic::new(parameters),
            fd_auto_switching: FlightDirectorAutoSwitchingActivation::default(),
            capt_efis: EfisPanelLogic::new("CAPT"),
            fo_efis: EfisPanelLogic::new("FO"),
            output: FcuOutput::default(),
        }
    }

    fn update(&mut self, input: &FcuInput, parameters: &FcuParameters) {
        for (channel, channel_input) in self.channels.iter_mut().zip(input.channels.iter()) {
            channel.update(input.delta, channel_input, parameters);
        }

        let healthy = self.channels.iter().any(|channel| channel.is_healthy());
        if healthy != self.healthy {
            if healthy {
                info!("FCU healthy");
            } else {
                warn!("FCU lost both channels");
            }
        }
        self.healthy = healthy;

        if !healthy {
            self.output = FcuOutput::default();
            return;
        }

        self.fmgc_selection.update(&input.discretes);
        self.afs
            .update(input.delta, &input.discretes.afs, &input.fmgc_1);
        self.fd_auto_switching.update(&input.fmgc_1);
        self.capt_efis.update(
            &input.discretes.capt_efis,
            input.discretes.pin_prog_qfe_avail,
            input.capt_baro_sync_hpa,
            &self.fd_auto_switching,
            parameters,
        );
        self.fo_efis.update(
            &input.discretes.fo_efis,
            input.discretes.pin_prog_qfe_avail,
            input.fo_baro_sync_hpa,
            &self.fd_auto_switching,
            parameters,
        );

        self.output = self.assemble_output(input);
    }

    fn assemble_output(&self, input: &FcuInput) -> FcuOutput {
        let discretes = &input.discretes;
        let fmgc = self.fmgc_selection.selected(input);
        let fmgc_1_has_priority = self.fmgc_selection.fmgc_1_has_priority();
        let afs = self.afs.state();
        let lamps = AfsModeLamps::from(fmgc);
        let capt_efis = self.capt_efis.outputs(&discretes.capt_efis);
        let fo_efis = self.fo_efis.outputs(&discretes.fo_efis);
        let auto_speed_control = fmgc.discrete_word_5.bit_if_normal(19);

        let mut fcu_word_1 = Arinc429DiscretesWordBuilder::new();
        fcu_word_1
            .set(11, afs.spd_mach.pushed)
            .set(12, afs.spd_mach.pulled)
            .set(16, afs.vs_fpa.pushed)
            .set(17, afs.alt.pushed)
            .set(18, afs.alt.pulled)
            .set(19, afs.vs_fpa.pulled)
            .set(20, afs.metric_alt_active)
            .set(21, afs.spd_mach_switching_pushed)
            .set(22, afs.exped_pushed)
            .set(23, afs.appr_pushed)
            .set(24, !afs.trk_fpa_active)
            .set(25, afs.trk_fpa_active);

        let mut fcu_word_2 = Arinc429DiscretesWordBuilder::new();
        fcu_word_2
            .set(11, afs.hdg_trk.pushed)
            .set(12, afs.hdg_trk.pulled)
            .set(13, afs.loc_pushed)
            .set(20, fmgc_1_has_priority)
            .set(21, !fmgc_1_has_priority)
            .set(26, !capt_efis.lights.fd)
            .set(27, !fo_efis.lights.fd);

        FcuOutput {
            discrete_outputs: FcuDiscreteOutputs {
                capt_efis,
                fo_efis,
                afs: AfsOutputs {
                    loc_light_on: lamps.loc,
                    exped_light_on: lamps.exped,
                    appr_light_on: lamps.appr,
                    ap_1_light_on: discretes.ap_1_engaged,
                    ap_2_light_on: discretes.ap_2_engaged,
                    athr_light_on: discretes.athr_1_engaged || discretes.athr_2_engaged,
                    trk_fpa_mode: afs.trk_fpa_active,
                    mach_mode: afs.mach_active,
                },
                fcu_healthy: true,
            },
            bus_outputs: FcuBusOutputs {
                baro_setting_left_hpa: Arinc429Word::new_norm(capt_efis.baro_setting_hpa),
                baro_setting_left_inhg: Arinc429Word::new_norm(capt_efis.baro_setting_inhg),
                baro_setting_right_hpa: Arinc429Word::new_norm(fo_efis.baro_setting_hpa),
                baro_setting_right_inhg: Arinc429Word::new_norm(fo_efis.baro_setting_inhg),
                eis_discrete_word_1_left: output::eis_discrete_word_1(&discretes.capt_efis),
                eis_discrete_word_1_right: output::eis_discrete_word_1(&discretes.fo_efis),
                eis_discrete_word_2_left: output::eis_discrete_word_2(
                    &discretes.capt_efis,
                    &capt_efis,
                ),
                eis_discrete_word_2_right: output::eis_discrete_word_2(
                    &discretes.fo_efis,
                    &fo_efis,
                ),
                fcu_discrete_word_1: fcu_word_1.build(SignStatus::NormalOperation),
                fcu_discrete_word_2: fcu_word_2.build(SignStatus::NormalOperation),
                ats_discrete_word: fmgc.ats_discrete_word,
                ats_fma_discrete_word: fmgc.ats_fma_discrete_word,
                flex_to_temp_deg_c: fmgc.flx_to_temp_deg_c,
                n1_command_percent: fmgc.n1_command_percent,
            },
            logic: FcuLogicOutputs {
                fmgc_1_has_priority,
                chosen_fmgc_data: ChosenFmgcData::from(fmgc),
                any_ap_fd_engaged: discretes.ap_1_engaged
                    || discretes.ap_2_engaged
                    || discretes.fd_1_engaged
                    || discretes.fd_2_engaged,
                afs_knobs: AfsKnobOutputs {
                    spd_mach: afs.spd_mach,
                    hdg_trk: afs.hdg_trk,
                    alt: afs.alt,
                    vs_fpa: afs.vs_fpa,
                },
                trk_fpa_active: afs.trk_fpa_active,
                metric_alt_active: afs.metric_alt_active,
                mach_active: afs.mach_active,
                auto_speed_control,
            },
        }
    }
}

/// The Flight Control Unit computer: two supervised channels running the AFS and EFIS control
/// panel logic. The host sets the inputs, steps the computer once per frame and reads the outputs.
pub struct FlightControlUnit {
    parameters: FcuParameters,
    input: FcuInput,
    runtime: Option<FcuRuntime>,
    output: FcuOutput,
}

impl FlightControlUnit {
    pub fn new(parameters: FcuParameters) -> Self {
        Self {
            parameters,
            input: FcuInput::default(),
            runtime: None,
            output: FcuOutput::default(),
        }
    }

    pub fn initialize(&mut self) {
        info!("FCU initialized");
        self.runtime = Some(FcuRuntime::new(&self.parameters));
        self.output = FcuOutput::default();
    }

    pub fn set_inputs(&mut self, input: FcuInput) {
        self.input = input;
    }

    pub fn step(&mut self) {
        if !self.input.computer_running {
            // The outputs of the last frame stay on the buses.
            self.runtime = None;
            return;
        }

        let parameters = &self.parameters;
        let runtime = self
            .runtime
            .get_or_insert_with(|| FcuRuntime::new(parameters));
        runtime.update(&self.input, parameters);
        self.output = runtime.output;
    }

    pub fn outputs(&self) -> &FcuOutput {
        &self.output
    }

    pub fn terminate(&mut self) {
        info!("FCU terminated");
        self.runtime = None;
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }
}

impl Default for FlightControlUnit {
    fn default() -> Self {
        Self::new(FcuParameters::default())
    }
}
