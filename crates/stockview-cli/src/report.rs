use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use stockview_core::{BarSize, PanelOutcome, PanelState, UtcDateTime};
use uuid::Uuid;

/// Request identifier (UUID v4) tying log lines to one rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Result of one `view` invocation.
#[derive(Debug, Serialize)]
pub struct ViewReport {
    pub request_id: RequestId,
    pub generated_at: UtcDateTime,
    pub interval: String,
    pub latency_ms: u64,
    #[serde(serialize_with = "serialize_panels")]
    pub panels: [PanelOutcome; 2],
}

impl ViewReport {
    pub fn new(interval: impl Into<String>, latency_ms: u64, panels: [PanelOutcome; 2]) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            generated_at: UtcDateTime::now(),
            interval: interval.into(),
            latency_ms,
            panels,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.panels.iter().any(PanelOutcome::is_error)
    }
}

/// Serialized form of a [`PanelOutcome`].
#[derive(Debug, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
enum PanelView<'a> {
    Chart {
        panel: usize,
        state: PanelState,
        heading: &'a str,
        title: &'a str,
        caption: &'a str,
        series: &'a stockview_core::BarSeries,
    },
    Hint {
        panel: usize,
        state: PanelState,
        message: &'a str,
    },
    Warning {
        panel: usize,
        state: PanelState,
        message: &'a str,
    },
    Error {
        panel: usize,
        state: PanelState,
        code: &'static str,
        message: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
}

impl<'a> PanelView<'a> {
    fn from_outcome(panel: usize, outcome: &'a PanelOutcome) -> Self {
        let state = outcome.state();
        match outcome {
            PanelOutcome::Rendered(rendered) => Self::Chart {
                panel,
                state,
                heading: &rendered.heading,
                title: &rendered.title,
                caption: &rendered.caption,
                series: &rendered.series,
            },
            PanelOutcome::Hint(message) => Self::Hint {
                panel,
                state,
                message,
            },
            PanelOutcome::NoData(message) => Self::Warning {
                panel,
                state,
                message,
            },
            PanelOutcome::Error(error) => Self::Error {
                panel,
                state,
                code: error.code(),
                message: error.message(),
                status: error.status_code(),
            },
        }
    }
}

fn serialize_panels<S>(panels: &[PanelOutcome; 2], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(
        panels
            .iter()
            .enumerate()
            .map(|(index, outcome)| PanelView::from_outcome(index + 1, outcome)),
    )
}

/// One line of `stockview intervals`.
#[derive(Debug, Serialize)]
pub struct IntervalRow {
    pub label: &'static str,
    pub endpoint: &'static str,
    pub bar_size: Option<BarSize>,
}
