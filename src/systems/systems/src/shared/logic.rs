use std::time::Duration;

/// A confirmation circuit, which only passes a signal once it has been stable for a certain amount
/// of time. When it detects either a rising or falling edge (depending on its type) it will wait
/// for a time delay period and emit the incoming signal if it was stable throughout the period.
/// If at any point during the period the signal reverts, the state is fully reset and the original
/// signal will be emitted again.
pub struct ConfirmationNode {
    leading_edge: bool,
    time_delay: Duration,
    condition_since: Duration,
    output: bool,
}

impl ConfirmationNode {
    pub fn new(leading_edge: bool, time_delay: Duration) -> Self {
        Self {
            leading_edge,
            time_delay,
            condition_since: Duration::ZERO,
            output: !leading_edge,
        }
    }

    pub fn new_leading(time_delay: Duration) -> Self {
        Self::new(true, time_delay)
    }

    pub fn new_falling(time_delay: Duration) -> Self {
        Self::new(false, time_delay)
    }

    pub fn update(&mut self, hi: bool, delta: Duration) -> bool {
        if hi == self.leading_edge {
            self.condition_since += delta;
            self.output = if self.condition_since >= self.time_delay {
                self.leading_edge
            } else {
                !self.leading_edge
            };
        } else {
            self.condition_since = Duration::ZERO;
            self.output = !self.leading_edge;
        }
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn reset(&mut self) {
        self.condition_since = Duration::ZERO;
        self.output = !self.leading_edge;
    }
}

/// A monostable trigger, which outputs lo until it detects a rising or falling edge. At that point
/// it will start outputting hi until the time delay period has elapsed. If the node is
/// retriggerable, a matching edge will reset the timer. Otherwise they are ignored until
/// the period has elapsed and the node outputs lo again.
///
/// Before the first update the previous input is assumed to be the opposite of the edge, so a
/// rising trigger fires if the very first sample is hi.
pub struct MonostableTriggerNode {
    leading_edge: bool,
    time_delay: Duration,
    retriggerable: bool,
    remaining_trigger: Duration,
    last_hi: Option<bool>,
    output: bool,
}

impl MonostableTriggerNode {
    pub fn new(leading_edge: bool, time_delay: Duration) -> Self {
        Self {
            leading_edge,
            time_delay,
            retriggerable: false,
            remaining_trigger: Duration::ZERO,
            last_hi: None,
            output: false,
        }
    }

    pub fn new_retriggerable(leading_edge: bool, time_delay: Duration) -> Self {
        Self {
            retriggerable: true,
            ..Self::new(leading_edge, time_delay)
        }
    }

    pub fn new_leading(time_delay: Duration) -> Self {
        Self::new(true, time_delay)
    }

    pub fn new_falling(time_delay: Duration) -> Self {
        Self::new(false, time_delay)
    }

    pub fn update(&mut self, hi: bool, delta: Duration) -> bool {
        self.remaining_trigger = self
            .remaining_trigger
            .checked_sub(delta)
            .unwrap_or_default();
        if self.retriggerable || self.remaining_trigger == Duration::ZERO {
            let condition_met =
                self.last_hi.unwrap_or(!self.leading_edge) != hi && hi == self.leading_edge;
            if condition_met {
                self.remaining_trigger = self.time_delay;
            }
        }
        self.last_hi = Some(hi);
        self.output = self.remaining_trigger > Duration::ZERO;
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn reset(&mut self) {
        self.remaining_trigger = Duration::ZERO;
        self.last_hi = None;
        self.output = false;
    }
}

/// A node that detects a rising or a falling edge and is hi for exactly one update. The first
/// sample only seeds the node, so a signal that is already present at cold start does not produce
/// a pulse.
pub struct PulseNode {
    leading_edge: bool,
    last_hi: Option<bool>,
    output: bool,
}

impl PulseNode {
    pub fn new(leading_edge: bool) -> Self {
        Self {
            leading_edge,
            last_hi: None,
            output: false,
        }
    }

    pub fn new_leading() -> Self {
        Self::new(true)
    }

    pub fn new_falling() -> Self {
        Self::new(false)
    }

    pub fn update(&mut self, hi: bool) -> bool {
        let last_hi = self.last_hi.unwrap_or(hi);
        self.output = if self.leading_edge {
            !last_hi && hi
        } else {
            last_hi && !hi
        };
        self.last_hi = Some(hi);
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn reset(&mut self) {
        self.last_hi = None;
        self.output = false;
    }
}

/// A flip-flop or memory circuit that can be used to store a single bit. It has two inputs: Set and
/// Reset. At first it will always emit a falsy value, until it receives a signal on the set input,
/// at which point it will start emitting a truthy value. This will continue until a signal is
/// received on the reset input, at which point it reverts to the original falsy output. If a signal
/// is received on both set and reset at the same time, the input with a star will have precedence.
pub struct MemoryNode {
    has_set_precedence: bool,
    output: bool,
}

impl MemoryNode {
    pub fn new(has_set_precedence: bool) -> Self {
        Self {
            has_set_precedence,
            output: false,
        }
    }

    pub fn new_set_dominant() -> Self {
        Self::new(true)
    }

    pub fn new_reset_dominant() -> Self {
        Self::new(false)
    }

    pub fn update(&mut self, set: bool, reset: bool) -> bool {
        self.output = if set && reset {
            self.has_set_precedence
        } else if set {
            true
        } else if reset {
            false
        } else {
            self.output
        };
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn reset(&mut self) {
        self.output = false;
    }
}

/// Inverts a stored bit each time it receives a pulse. The stored bit starts at the initial value
/// given on construction and returns to it on reset.
pub struct ToggleFlipFlopNode {
    initial: bool,
    output: bool,
}

impl ToggleFlipFlopNode {
    pub fn new(initial: bool) -> Self {
        Self {
            initial,
            output: initial,
        }
    }

    pub fn update(&mut self, pulse: bool) -> bool {
        if pulse {
            self.output = !self.output;
        }
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn reset(&mut self) {
        self.output = self.initial;
    }
}

/// Measures for how long a condition has been continuously true. Reads zero while the condition
/// is false and on the update in which it first becomes true.
#[derive(Default)]
pub struct TimeSinceConditionNode {
    elapsed: Option<Duration>,
}

impl TimeSinceConditionNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, condition: bool, delta: Duration) -> Duration {
        self.elapsed = if condition {
            Some(self.elapsed.map_or(Duration::ZERO, |elapsed| elapsed + delta))
        } else {
            None
        };
        self.output()
    }

    pub fn output(&self) -> Duration {
        self.elapsed.unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.elapsed = None;
    }
}
