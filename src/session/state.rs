use serde::Serialize;

/// Step within an active question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStep {
    /// Question shown, waiting for the user to record
    AwaitingRecord,
    /// Answer-capture request in flight
    Recording,
    /// Answer resolved, waiting for the user to move on
    AwaitingAdvance,
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "step", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Starting,
    Active(ActiveStep),
    Finishing,
    Finished,
}

/// Which user controls are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Affordances {
    pub start: bool,
    pub record: bool,
    pub next: bool,
    pub end: bool,
}

impl Affordances {
    /// Enabled controls are a pure function of the phase, so every
    /// transition (including failure paths) leaves them consistent.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Self {
                start: true,
                end: true,
                ..Self::default()
            },
            Phase::Starting => Self {
                end: true,
                ..Self::default()
            },
            Phase::Active(ActiveStep::AwaitingRecord) => Self {
                record: true,
                end: true,
                ..Self::default()
            },
            Phase::Active(ActiveStep::Recording) => Self {
                end: true,
                ..Self::default()
            },
            Phase::Active(ActiveStep::AwaitingAdvance) => Self {
                next: true,
                end: true,
                ..Self::default()
            },
            Phase::Finishing | Phase::Finished => Self::default(),
        }
    }
}

/// Result of advancing past the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Show the question at this index
    Question(usize),
    /// Past the last question
    Finish,
}

/// The interview's single mutable aggregate
///
/// Invariant: `question_index < total_questions` while `active`.
#[derive(Debug, Clone)]
pub struct Session {
    role: String,
    session_id: String,
    question_index: usize,
    total_questions: Option<usize>,
    active: bool,
    recording: bool,
    phase: Phase,
}

impl Session {
    pub fn new(role: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            session_id: session_id.into(),
            question_index: 0,
            total_questions: None,
            active: false,
            recording: false,
            phase: Phase::Idle,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn total_questions(&self) -> Option<usize> {
        self.total_questions
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn affordances(&self) -> Affordances {
        Affordances::for_phase(self.phase)
    }

    /// Idle -> Starting
    pub fn begin_start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Starting;
        true
    }

    /// Starting -> Idle (start failed; the user may retry)
    pub fn abort_start(&mut self) {
        if self.phase == Phase::Starting {
            self.phase = Phase::Idle;
        }
    }

    /// Starting -> Active(0)
    ///
    /// The question count is only ever set here. Returns false if the
    /// session left `Starting` while the request was in flight.
    pub fn activate(&mut self, total_questions: usize, session_id: Option<String>) -> bool {
        if self.phase != Phase::Starting || total_questions == 0 {
            return false;
        }
        self.total_questions = Some(total_questions);
        if let Some(id) = session_id {
            self.session_id = id;
        }
        self.question_index = 0;
        self.active = true;
        self.phase = Phase::Active(ActiveStep::AwaitingRecord);
        true
    }

    /// AwaitingRecord -> Recording
    pub fn begin_recording(&mut self) -> bool {
        if self.phase != Phase::Active(ActiveStep::AwaitingRecord) {
            return false;
        }
        self.recording = true;
        self.phase = Phase::Active(ActiveStep::Recording);
        true
    }

    /// Recording -> AwaitingAdvance
    ///
    /// Always clears the recording flag, even if the session was ended
    /// while the capture request was in flight.
    pub fn end_recording(&mut self) {
        self.recording = false;
        if self.phase == Phase::Active(ActiveStep::Recording) {
            self.phase = Phase::Active(ActiveStep::AwaitingAdvance);
        }
    }

    /// AwaitingRecord -> AwaitingAdvance without a capture (no stream)
    pub fn skip_recording(&mut self) -> bool {
        if self.phase != Phase::Active(ActiveStep::AwaitingRecord) {
            return false;
        }
        self.phase = Phase::Active(ActiveStep::AwaitingAdvance);
        true
    }

    /// AwaitingAdvance -> next question, or Finishing past the last one
    ///
    /// The only place the question index moves.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != Phase::Active(ActiveStep::AwaitingAdvance) {
            return None;
        }
        let total = self.total_questions?;

        self.question_index += 1;
        if self.question_index >= total {
            self.active = false;
            self.phase = Phase::Finishing;
            Some(Advance::Finish)
        } else {
            self.phase = Phase::Active(ActiveStep::AwaitingRecord);
            Some(Advance::Question(self.question_index))
        }
    }

    /// Enter Finishing from any phase that is not already finishing or
    /// waiting on a start request
    pub fn begin_finish(&mut self) -> bool {
        match self.phase {
            Phase::Starting | Phase::Finishing | Phase::Finished => false,
            Phase::Idle | Phase::Active(_) => {
                self.active = false;
                self.phase = Phase::Finishing;
                true
            }
        }
    }

    /// Finishing -> Finished
    pub fn complete_finish(&mut self) {
        self.active = false;
        self.phase = Phase::Finished;
    }

    /// Forced termination; not available once finishing has begun
    pub fn terminate(&mut self) -> bool {
        if matches!(self.phase, Phase::Finishing | Phase::Finished) {
            return false;
        }
        self.active = false;
        self.phase = Phase::Finished;
        true
    }
}
