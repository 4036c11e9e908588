use serde_json::Value;

/// Participant name used for `robot.speech` entries
pub const ROBOT: &str = "Robot";
/// Participant name used when the speaker cannot be determined
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_TIME: &str = "Unknown";
const ACTION_MARK: &str = r#"<mark name="action"/>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub session_name: String,
    pub start_time: String,
    pub end_time: String,
}

impl SessionHeader {
    /// Title block lines shared by the PDF and the spreadsheet
    pub fn title_lines(&self) -> [String; 3] {
        [
            format!("Title: {}", self.session_name),
            format!("Session Start Time: {}", self.start_time),
            format!("Session End Time: {}", self.end_time),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RobotSpeech,
    UserSpeech,
    UserResponse,
    Unknown,
}

impl EventKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "robot.speech" => EventKind::RobotSpeech,
            "user.speech" => EventKind::UserSpeech,
            "user.response" => EventKind::UserResponse,
            _ => EventKind::Unknown,
        }
    }
}

/// One emitted dialog turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    pub timestamp: String,
    pub participant: String,
    pub text: String,
}

impl DialogEntry {
    /// Speaker prefix drawn in the participant's color
    pub fn speaker_label(&self) -> String {
        format!("{} {}: ", self.timestamp, self.participant)
    }

    /// Text as it goes into a single spreadsheet cell
    pub fn single_line_text(&self) -> String {
        self.text.replace('\n', " ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedEvents {
    /// Events without a `startTime` or `type`
    pub missing_fields: usize,
    /// `user.response` events, which are never emitted
    pub responses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub header: SessionHeader,
    pub entries: Vec<DialogEntry>,
    pub skipped: SkippedEvents,
}

/// Returned when a log has no events after the header record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientData {
    pub records: usize,
}

impl Transcript {
    /// Normalize raw log records.
    ///
    /// The first record is the session header; every other record is a
    /// candidate event. The session end time comes from the last record.
    pub fn from_records(records: &[Value]) -> Result<Self, InsufficientData> {
        let [first, events @ ..] = records else {
            return Err(InsufficientData { records: 0 });
        };
        let Some(last) = events.last() else {
            return Err(InsufficientData { records: 1 });
        };

        let header = SessionHeader {
            session_name: str_field(first, "sessionName")
                .unwrap_or(UNKNOWN_TITLE)
                .to_string(),
            start_time: normalize_timestamp(str_field(first, "startTime").unwrap_or(UNKNOWN_TIME))
                .to_string(),
            end_time: normalize_timestamp(str_field(last, "endTime").unwrap_or(UNKNOWN_TIME))
                .to_string(),
        };

        let mut entries = Vec::new();
        let mut skipped = SkippedEvents::default();

        for (index, record) in events.iter().enumerate() {
            let (Some(start_time), Some(kind)) =
                (str_field(record, "startTime"), str_field(record, "type"))
            else {
                tracing::debug!(record = index + 1, "Skipping event without startTime or type");
                skipped.missing_fields += 1;
                continue;
            };

            let participant = match EventKind::parse(kind) {
                EventKind::RobotSpeech => ROBOT,
                EventKind::UserSpeech => str_field(record, "user").unwrap_or(UNKNOWN_PARTICIPANT),
                EventKind::UserResponse => {
                    skipped.responses += 1;
                    continue;
                }
                EventKind::Unknown => UNKNOWN_PARTICIPANT,
            };

            entries.push(DialogEntry {
                timestamp: normalize_timestamp(start_time).to_string(),
                participant: participant.to_string(),
                text: strip_action_marks(str_field(record, "text").unwrap_or_default()),
            });
        }

        Ok(Transcript {
            header,
            entries,
            skipped,
        })
    }
}

fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Drop the fractional-seconds suffix of a timestamp
pub fn normalize_timestamp(timestamp: &str) -> &str {
    timestamp
        .split_once('.')
        .map_or(timestamp, |(seconds, _)| seconds)
}

/// Remove Furhat gesture marks from spoken text
pub fn strip_action_marks(text: &str) -> String {
    text.replace(ACTION_MARK, "")
}
