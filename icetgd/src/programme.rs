//! Normalized programme records.
//!
//! Every field of a guide `<programme>` except the title, channel and
//! start/stop times is optional, and absence is the normal case. Optional
//! text fields are `Option<String>`, and list fields are `Vec<String>`
//! where an empty list means the guide had no (non-blank) entries.
//!
//! `previously-shown` has three states, see [`PreviouslyShown`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::time::{parse_guide_timestamp, parse_previously_shown_date};
use crate::{Element, GuideError};

/// Repeat information for a programme that was shown before.
///
/// A programme that was never shown before has no `PreviouslyShown` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviouslyShown {
    /// A repeat, original air date not given.
    UnknownDate,

    /// A repeat, last shown on the given date.
    LastShown(NaiveDate),
}

impl PreviouslyShown {
    /// Interpret the `start` attribute of a `<previously-shown>` element.
    ///
    /// A missing or empty attribute means the date is unknown.
    pub fn from_start_attr(start: Option<&str>) -> Result<PreviouslyShown, GuideError> {
        match start {
            None | Some("") => Ok(PreviouslyShown::UnknownDate),
            Some(date) => parse_previously_shown_date(date).map(PreviouslyShown::LastShown),
        }
    }
}

/// One broadcast from the guide, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Programme {
    /// Programme title, empty if the guide omits it.
    pub title: String,

    /// Episode title.
    pub sub_title: Option<String>,

    /// Long description.
    pub desc: Option<String>,

    /// Genres, in guide order. Blank entries are dropped.
    pub categories: Vec<String>,

    /// Channel id, a key into the [`ChannelDirectory`](crate::ChannelDirectory).
    pub channel: String,

    /// Classification, ex: `M`, `PG`.
    pub rating: Option<String>,

    /// Production year.
    pub date: Option<String>,

    /// Present when teletext subtitles are available. Only presence is
    /// meaningful.
    pub subtitles: Option<String>,

    /// Repeat information, `None` for a first showing.
    pub previously_shown: Option<PreviouslyShown>,

    /// Directors, in guide order.
    pub directors: Vec<String>,

    /// Cast, in guide order.
    pub actors: Vec<String>,

    /// Start time.
    pub start: DateTime<Utc>,

    /// Stop time.
    pub stop: DateTime<Utc>,
}

impl Programme {
    /// Create a programme with only the required fields set.
    pub fn new(
        title: impl Into<String>,
        channel: impl Into<String>,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    ) -> Programme {
        Programme {
            title: title.into(),
            sub_title: None,
            desc: None,
            categories: Vec::new(),
            channel: channel.into(),
            rating: None,
            date: None,
            subtitles: None,
            previously_shown: None,
            directors: Vec::new(),
            actors: Vec::new(),
            start,
            stop,
        }
    }

    /// Extract a programme from a `<programme>` element.
    ///
    /// Fails if `start` or `stop` is missing or malformed, or if a
    /// `previously-shown` date is malformed. Everything else may be absent.
    pub fn from_element(element: &Element) -> Result<Programme, GuideError> {
        let timestamp = |name: &str| match element.attr(name) {
            Some(text) => parse_guide_timestamp(text),
            None => Err(GuideError::MalformedTimestamp {
                text: String::new(),
            }),
        };
        let text = |path: &str| element.find_text(path).map(str::to_string);

        let previously_shown = match element.find("previously-shown") {
            Some(shown) => Some(PreviouslyShown::from_start_attr(shown.attr("start"))?),
            None => None,
        };

        Ok(Programme {
            title: text("title").unwrap_or_default(),
            sub_title: text("sub-title"),
            desc: text("desc"),
            categories: text_list(element, "category"),
            channel: element.attr("channel").unwrap_or_default().to_string(),
            rating: text("rating/value"),
            date: text("date"),
            subtitles: text("subtitles"),
            previously_shown,
            directors: text_list(element, "credits/director"),
            actors: text_list(element, "credits/actor"),
            start: timestamp("start")?,
            stop: timestamp("stop")?,
        })
    }
}

/// Text of every element matching `path`, skipping empty and blank ones.
fn text_list(element: &Element, path: &str) -> Vec<String> {
    element
        .find_all(path)
        .into_iter()
        .filter_map(|e| e.text.as_deref())
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract every `<programme>` child of the guide root, in document order.
///
/// Stops at the first programme that fails to extract.
pub fn programmes_from_element(root: &Element) -> Result<Vec<Programme>, GuideError> {
    root.find_all("programme")
        .into_iter()
        .map(Programme::from_element)
        .collect()
}
