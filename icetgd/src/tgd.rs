//! TGD line formatting.
//!
//! A TGD line is eight tab separated fields:
//!
//! | # | field             | source                                             |
//! |---|-------------------|----------------------------------------------------|
//! | 1 | channel           | LCN of the programme's channel                     |
//! | 2 | start             | local display time, `YYYY/MM/DD HH:MM`             |
//! | 3 | duration          | whole minutes                                      |
//! | 4 | title             | [`title`]                                          |
//! | 5 | short description | [`short_description`]                              |
//! | 6 | description       | [`description`]                                    |
//! | 7 | rating            | [`rating`]                                         |
//! | 8 | `N`               | constant                                           |
//!
//! Absent values always render as empty strings.

use itertools::Itertools;

use crate::time::{
    filename_for_date, format_display_datetime, format_duration_minutes, format_short_date,
};
use crate::{ChannelDirectory, GuideError, PreviouslyShown, Programme};

/// Rating used for programmes the guide has no rating for.
pub const UNRATED: &str = "X";

/// Last field of every TGD line.
pub const FINAL_FIELD: &str = "N";

/// Field separator.
pub const SEPARATOR: &str = "\t";

/// LCN of the programme's channel.
pub fn tgd_channel<'a>(
    programme: &Programme,
    channels: &'a ChannelDirectory,
) -> Result<&'a str, GuideError> {
    channels.lookup_lcn(&programme.channel)
}

/// Title, with the production year appended when known: `Title (1996)`.
pub fn title(programme: &Programme) -> String {
    match &programme.date {
        Some(date) => format!("{} ({})", programme.title, date),
        None => programme.title.clone(),
    }
}

/// Sub-title followed by the bracketed category list: `Episode [News/Sport]`.
///
/// Either part may be missing, the parts present are joined by a single
/// space. Categories are only shown when the first one is not blank.
pub fn short_description(programme: &Programme) -> String {
    let categories = match programme.categories.first() {
        Some(first) if !first.trim().is_empty() => {
            Some(format!("[{}]", programme.categories.iter().join("/")))
        }
        _ => None,
    };
    programme
        .sub_title
        .iter()
        .cloned()
        .chain(categories)
        .filter(|part| !part.is_empty())
        .join(" ")
}

/// Cast as `A, B, C`, or `None` without actors.
pub fn cast_text(programme: &Programme) -> Option<String> {
    if programme.actors.is_empty() {
        return None;
    }
    Some(programme.actors.iter().join(", "))
}

/// Directors as `A, B`, or `None` without directors.
pub fn director_text(programme: &Programme) -> Option<String> {
    if programme.directors.is_empty() {
        return None;
    }
    Some(programme.directors.iter().join(", "))
}

/// Description with subtitle, repeat, cast and director annotations.
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// use icetgd::{tgd, PreviouslyShown, Programme};
///
/// # let start = Utc.with_ymd_and_hms(2009, 11, 5, 9, 35, 0).unwrap();
/// # let stop = Utc.with_ymd_and_hms(2009, 11, 5, 11, 5, 0).unwrap();
/// let mut p = Programme::new("Suburb of the Moths", "32", start, stop);
/// p.desc = Some("Moths from hell.".to_string());
/// p.subtitles = Some(String::new());
/// p.previously_shown = Some(PreviouslyShown::UnknownDate);
/// p.actors = vec!["Oliver Boliver Butt".to_string()];
/// p.directors = vec!["Dave Keenan".to_string()];
///
/// assert_eq!(
///     "Moths from hell. [Subtitles] [Repeat] Oliver Boliver Butt. Dir. Dave Keenan.",
///     tgd::description(&p)
/// );
/// ```
pub fn description(programme: &Programme) -> String {
    let mut desc = programme.desc.clone().unwrap_or_default();
    if programme.subtitles.is_some() {
        desc.push_str(" [Subtitles]");
    }
    match programme.previously_shown {
        Some(PreviouslyShown::UnknownDate) => desc.push_str(" [Repeat]"),
        Some(PreviouslyShown::LastShown(date)) => {
            desc.push_str(&format!(" [Repeat, last shown {}]", format_short_date(date)));
        }
        None => {}
    }
    if let Some(cast) = cast_text(programme) {
        desc.push_str(&format!(" {}.", cast));
    }
    if let Some(directors) = director_text(programme) {
        desc.push_str(&format!(" Dir. {}.", directors));
    }
    desc
}

/// Rating, or [`UNRATED`].
pub fn rating(programme: &Programme) -> &str {
    programme.rating.as_deref().unwrap_or(UNRATED)
}

/// Name of the TGD file a programme belongs in, from its local start date.
pub fn tgd_filename(programme: &Programme) -> String {
    filename_for_date(programme.start)
}

/// Complete TGD line for a programme, without line ending.
pub fn format_line(
    programme: &Programme,
    channels: &ChannelDirectory,
) -> Result<String, GuideError> {
    let lcn = tgd_channel(programme, channels)?;
    let start = format_display_datetime(programme.start);
    let duration = format_duration_minutes(programme.start, programme.stop)?;
    let title = title(programme);
    let short_description = short_description(programme);
    let description = description(programme);

    let fields: [&str; 8] = [
        lcn,
        &start,
        &duration,
        &title,
        &short_description,
        &description,
        rating(programme),
        FINAL_FIELD,
    ];
    Ok(fields.join(SEPARATOR))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;
    use crate::testing::{spiderman, trivial_guide, utc};

    #[test]
    fn programme_to_tgd() {
        let guide = trivial_guide();
        let line = format_line(&spiderman(), &guide.channels).unwrap();
        assert_eq!(
            "23\t2009/10/30 22:00\t30\tSpiderman\tThe One Where Spiderman Eats Salad [News/Sport]\tAction is his reward.\tX\tN",
            line
        );
        // parsed and hand built records agree
        assert_eq!(line, format_line(&guide.programmes[0], &guide.channels).unwrap());
    }

    #[test]
    fn programme_without_desc() {
        let guide = trivial_guide();
        let mut p = spiderman();
        p.desc = None;
        assert_eq!(
            "23\t2009/10/30 22:00\t30\tSpiderman\tThe One Where Spiderman Eats Salad [News/Sport]\t\tX\tN",
            format_line(&p, &guide.channels).unwrap()
        );
    }

    #[test]
    fn absent_fields_render_empty() {
        let guide = trivial_guide();
        let p = Programme::new("", "2300", utc(2009, 10, 30, 11, 0), utc(2009, 10, 30, 11, 0));
        let line = format_line(&p, &guide.channels).unwrap();
        assert_eq!("23\t2009/10/30 22:00\t0\t\t\t\tX\tN", line);
        assert!(!line.contains("None"));
        assert_eq!(8, line.split('\t').count());
    }

    #[test]
    fn unknown_channel_fails() {
        let guide = trivial_guide();
        let err = format_line(&guide.programmes[1], &guide.channels).unwrap_err();
        assert!(matches!(err, GuideError::UnknownChannel { ref id } if id == "32"), "{err:?}");
    }

    #[test]
    fn stop_before_start_fails() {
        let guide = trivial_guide();
        let mut p = spiderman();
        p.stop = utc(2009, 10, 30, 10, 0);
        let err = format_line(&p, &guide.channels).unwrap_err();
        assert!(matches!(err, GuideError::InvalidInterval { .. }), "{err:?}");
    }

    #[test]
    fn title_includes_year() {
        let guide = trivial_guide();
        assert_eq!("Suburb of the Moths (1996)", title(&guide.programmes[2]));
        assert_eq!("Spiderman", title(&guide.programmes[0]));
    }

    #[test]
    fn unrated_programmes_are_rated_x() {
        let guide = trivial_guide();
        assert_eq!("X", rating(&guide.programmes[0]));
        assert_eq!("M", rating(&guide.programmes[2]));
    }

    #[test]
    fn short_description_includes_category() {
        let guide = trivial_guide();
        assert_eq!(
            "The One Where Spiderman Eats Salad [News/Sport]",
            short_description(&guide.programmes[0])
        );
        assert_eq!(
            "TBA [Football/Soccer/Sport]",
            short_description(&guide.programmes[1])
        );
        // no sub-title, no stray leading space
        assert_eq!("[Movie]", short_description(&guide.programmes[2]));
    }

    #[test]
    fn short_description_edge_cases() {
        let mut p = spiderman();
        p.categories.clear();
        assert_eq!("The One Where Spiderman Eats Salad", short_description(&p));

        p.sub_title = None;
        assert_eq!("", short_description(&p));

        p.categories = vec![" ".to_string(), "News".to_string()];
        assert_eq!("", short_description(&p));

        p.sub_title = Some(String::new());
        p.categories = vec!["News".to_string()];
        assert_eq!("[News]", short_description(&p));
    }

    #[test]
    fn description_says_subtitles_if_they_exist() {
        let guide = trivial_guide();
        assert!(description(&guide.programmes[2]).contains("[Subtitles]"));
        assert!(!description(&guide.programmes[0]).contains("[Subtitles]"));
    }

    #[test]
    fn description_repeats() {
        let guide = trivial_guide();
        assert!(!description(&guide.programmes[0]).contains("[Repeat"));
        assert!(description(&guide.programmes[2]).contains("[Repeat]"));

        let date = format_short_date(NaiveDate::from_ymd_opt(2009, 9, 17).unwrap());
        assert_eq!("09/17/09", date);
        assert_eq!(
            " [Repeat, last shown 09/17/09]",
            description(&guide.programmes[1])
        );
    }

    #[test]
    fn description_full() {
        let guide = trivial_guide();
        assert_eq!(
            "A suburb is terrorised by shrimp moths from hell. [Subtitles] [Repeat] \
             Marvin O'Gravel Ballon-Face, Oliver Boliver Butt, Zanzibar Buck-Buck McBean. \
             Dir. Dave Keenan.",
            description(&guide.programmes[2])
        );
    }

    #[test]
    fn cast_and_director_text() {
        let guide = trivial_guide();
        assert_eq!(None, cast_text(&guide.programmes[0]));
        assert_eq!(None, director_text(&guide.programmes[0]));
        assert_eq!(Some("Dave Keenan"), director_text(&guide.programmes[2]).as_deref());
        assert_eq!(
            Some("Marvin O'Gravel Ballon-Face, Oliver Boliver Butt, Zanzibar Buck-Buck McBean"),
            cast_text(&guide.programmes[2]).as_deref()
        );
    }

    #[test]
    fn filename_from_programme() {
        assert_eq!("20091030.tgd", tgd_filename(&spiderman()));
        let guide = trivial_guide();
        // 09:35 UTC is 20:35 local, same day
        assert_eq!("20091105.tgd", tgd_filename(&guide.programmes[2]));
    }
}
