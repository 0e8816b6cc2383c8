//! Guide to TGD batch conversion.
//!
//! Programmes are converted in document order. Only programmes on
//! standard definition channels ([`SD_CHANNELS`]) are written, each to the
//! file for its local start date. The first error aborts the run.

use std::fs;
use std::path::Path;

use tracing::{error, info, instrument};

use crate::{tgd, Guide, GuideError, TgdWriter};

/// LCNs of the channels whose programmes are written.
pub const SD_CHANNELS: [&str; 11] = ["2", "22", "3", "7", "9", "10", "23", "32", "72", "99", "12"];

/// Guide file read when no input is given.
pub const DEFAULT_INPUT: &str = "iceguide.xml";

/// Directory TGD files are written to when none is given.
pub const DEFAULT_OUT_DIR: &str = "out";

/// True if programmes on channel number `lcn` are written.
pub fn is_sd_channel(lcn: &str) -> bool {
    SD_CHANNELS.contains(&lcn)
}

/// Counts from a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvertSummary {
    /// Lines written.
    pub written: usize,

    /// Programmes skipped because their channel is not in [`SD_CHANNELS`].
    pub skipped: usize,

    /// Number of times an output file was opened.
    pub files_opened: usize,
}

/// Write every allow-listed programme of `guide` through `writer`.
///
/// Stops at the first programme on an unknown channel or with an invalid
/// interval, after logging it. Lines already written stay written.
#[instrument(skip_all)]
pub fn convert(guide: &Guide, writer: &mut TgdWriter) -> Result<ConvertSummary, GuideError> {
    let mut summary = ConvertSummary::default();
    for programme in &guide.programmes {
        let line = tgd::tgd_channel(programme, &guide.channels)
            .and_then(|lcn| {
                if is_sd_channel(lcn) {
                    tgd::format_line(programme, &guide.channels).map(Some)
                } else {
                    Ok(None)
                }
            })
            .map_err(|err| {
                error!("{err} while converting programme: {programme:?}");
                err
            })?;

        match line {
            Some(line) => {
                writer.write_line(&tgd::tgd_filename(programme), &line)?;
                summary.written += 1;
            }
            None => summary.skipped += 1,
        }
    }
    summary.files_opened = writer.files_opened();
    Ok(summary)
}

/// Convert the guide at `input`, appending to TGD files in `out_dir`.
///
/// `out_dir` is created if missing.
#[instrument]
pub fn convert_file(input: &Path, out_dir: &Path) -> Result<ConvertSummary, GuideError> {
    let guide = Guide::from_path(input)?;
    info!(
        channels = guide.channels.len(),
        programmes = guide.programmes.len(),
        "loaded guide"
    );

    fs::create_dir_all(out_dir)?;
    let mut writer = TgdWriter::new(out_dir);
    let mut summary = convert(&guide, &mut writer)?;
    summary.files_opened = writer.finish()?;
    Ok(summary)
}
