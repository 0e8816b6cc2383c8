//!
//! Convert IceTV XML programme guides into TGD schedule files.
//!
//! An IceTV guide is an XMLTV-style document listing channels and the
//! programmes scheduled on them. TGD is a tab-delimited schedule format with
//! one line per broadcast, grouped into one file per local calendar day.
//!
//! Load a guide, then format any programme as a TGD line:
//!
//! ```
//! use icetgd::{tgd, Guide};
//!
//! let xml = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
//! <tv>
//!   <channel id="2300"><display-name>TwentyThree</display-name><lcn>23</lcn></channel>
//!   <programme start="20091030110000 +0000" stop="20091030113000 +0000" channel="2300">
//!     <title>Spiderman</title>
//!     <category>News</category>
//!   </programme>
//! </tv>"#;
//!
//! let guide = Guide::from_reader(xml.as_bytes())?;
//! let programme = &guide.programmes[0];
//!
//! assert_eq!(tgd::tgd_filename(programme), "20091030.tgd");
//! assert_eq!(
//!     tgd::format_line(programme, &guide.channels)?,
//!     "23\t2009/10/30 22:00\t30\tSpiderman\t[News]\t\tX\tN"
//! );
//! # Ok::<(), icetgd::GuideError>(())
//! ```
//!
//! Or run the whole batch, appending every allow-listed programme to
//! `YYYYMMDD.tgd` files in an output directory:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let summary = icetgd::batch::convert_file(Path::new("iceguide.xml"), Path::new("out"))?;
//! println!("{} lines written", summary.written);
//! # Ok::<(), icetgd::GuideError>(())
//! ```
//!
//! NOTE: local times are computed with a fixed +11:00 offset (see
//! [`time::DisplayOffset`]), not a timezone database lookup. Daylight saving
//! changes are not reflected.
//!
//! WARNING: output files are opened in append mode. Converting the same guide
//! twice appends duplicate lines.

extern crate alloc;

use core::fmt::{Display, Formatter};
use std::error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::instrument;

pub mod batch;
pub mod channel;
pub mod element;
pub mod programme;
pub mod testing;
pub mod tgd;
pub mod time;
pub mod writer;

pub use crate::channel::{Channel, ChannelDirectory};
pub use crate::element::Element;
pub use crate::programme::{PreviouslyShown, Programme};
pub use crate::writer::TgdWriter;

/// Guide conversion errors.
///
/// Any of these aborts a batch run. Missing optional fields in the guide are
/// never errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum GuideError {
    /// A `start`/`stop` attribute or `previously-shown` date does not match
    /// the expected fixed format.
    MalformedTimestamp {
        /// The offending text.
        text: String,
    },

    /// A programme stops before it starts.
    InvalidInterval {
        /// Programme start.
        start: DateTime<Utc>,

        /// Programme stop, earlier than `start`.
        stop: DateTime<Utc>,
    },

    /// A programme references a channel id missing from the channel list.
    UnknownChannel {
        /// The channel id referenced by the programme.
        id: String,
    },

    /// An error occurred reading the guide or writing TGD files.
    ///
    /// Contains an [`std::io::Error`]
    Io(io::Error),

    /// An error occured while parsing XML data.
    ///
    /// A string representation of the underlying error. The xml library error
    /// type is not exposed.
    Parse {
        /// Parsing error message.
        message: String,
    },
}

impl error::Error for GuideError {}

impl Display for GuideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            GuideError::MalformedTimestamp { text } => {
                write!(f, "MalformedTimestamp: {:?}", text)
            }
            GuideError::InvalidInterval { start, stop } => {
                write!(f, "InvalidInterval: stop {} is before start {}", stop, start)
            }
            GuideError::UnknownChannel { id } => write!(f, "UnknownChannel: {:?}", id),
            GuideError::Io(err) => write!(f, "Io: {}", err),
            GuideError::Parse { message } => write!(f, "Parse: {}", message),
        }
    }
}

impl From<io::Error> for GuideError {
    fn from(err: io::Error) -> Self {
        GuideError::Io(err)
    }
}

/// A fully loaded guide: the channel directory and every programme in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    /// Channels keyed by channel id.
    pub channels: ChannelDirectory,

    /// Normalized programmes, in the order they appear in the document.
    pub programmes: Vec<Programme>,
}

impl Guide {
    /// Build channels and programmes from an already parsed document.
    pub fn from_element(root: &Element) -> Result<Guide, GuideError> {
        Ok(Guide {
            channels: ChannelDirectory::from_element(root),
            programmes: programme::programmes_from_element(root)?,
        })
    }

    /// Parse a guide document.
    pub fn from_reader(reader: impl io::Read) -> Result<Guide, GuideError> {
        let root = Element::from_reader(reader)?;
        Guide::from_element(&root)
    }

    /// Open and parse a guide file.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Guide, GuideError> {
        let file = File::open(path)?;
        Guide::from_reader(BufReader::new(file))
    }
}
