#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
//! Shared fixtures for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::{Guide, Programme};

pub(crate) const TRIVIAL_GUIDE: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<!DOCTYPE tv SYSTEM "http://iceguide.icetv.com.au/iceguide/iceguide.dtd">
<tv>
	<channel id="2300">
		<display-name>TwentyThree</display-name>
		<region-name>Melbourne</region-name>
		<lcn>23</lcn>
	</channel>
	<programme start="20091030110000 +0000" stop="20091030113000 +0000" channel="2300">
		<title lang="en">Spiderman</title>
		<sub-title lang="en">The One Where Spiderman Eats Salad</sub-title>
		<desc lang="en">Action is his reward.</desc>
		<category lang="en">News</category>
		<category lang="en">Sport</category>
		<episode-num system="icetv">169-0</episode-num>
	</programme>
	<programme start="20091104093500 +0000" stop="20091104110500 +0000" channel="32">
		<title lang="en">Soccer: UEFA Champions League</title>
		<sub-title lang="en">TBA</sub-title>
		<category lang="en">Football</category>
		<category lang="en">Soccer</category>
		<category lang="en">Sport</category>
		<episode-num system="icetv">14328-72386</episode-num>
		<previously-shown start="20090917"/>
	</programme>
	<programme start="20091105093500 +0000" stop="20091105110500 +0000" channel="32">
		<title lang="en">Suburb of the Moths</title>
                <desc lang="en">A suburb is terrorised by shrimp moths from hell.</desc>
                <credits>
                        <director>Dave Keenan</director>
                        <actor>Marvin O'Gravel Ballon-Face</actor>
                        <actor>Oliver Boliver Butt</actor>
                        <actor>Zanzibar Buck-Buck McBean</actor>
                </credits>
                <date>1996</date>
		<category lang="en">Movie</category>
		<subtitles type="teletext"/>
                <rating system="">
                        <value>M</value>
                </rating>
		<previously-shown/>
	</programme>

</tv>
"#;

pub(crate) fn trivial_guide() -> Guide {
    Guide::from_reader(TRIVIAL_GUIDE.as_bytes()).expect("while loading TRIVIAL_GUIDE")
}

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

/// The Spiderman programme, built by hand rather than parsed.
pub(crate) fn spiderman() -> Programme {
    let mut p = Programme::new(
        "Spiderman",
        "2300",
        utc(2009, 10, 30, 11, 0),
        utc(2009, 10, 30, 11, 30),
    );
    p.sub_title = Some("The One Where Spiderman Eats Salad".to_string());
    p.desc = Some("Action is his reward.".to_string());
    p.categories = vec!["News".to_string(), "Sport".to_string()];
    p
}
