// Locates the newest trend chart in an unordered artifact listing.
// Names follow `<stem>_YYYYMMDD_HHMMSS.png`; the embedded instant is UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// File-name stem of the charts rendered by the trend job.
pub const TREND_STEM: &str = "temperature_trends";

pub struct TrendResolver {
    pattern: Regex,
}

impl TrendResolver {
    pub fn new(stem: &str) -> anyhow::Result<Self> {
        let pattern = Regex::new(&format!(
            r"^{}_(\d{{8}})_(\d{{6}})\.png$",
            regex::escape(stem)
        ))?;
        Ok(Self { pattern })
    }

    /// Capture instant embedded in `name`, or None when the name does not match
    /// exactly or the digits are not a calendar date/time.
    pub fn capture_instant(&self, name: &str) -> Option<DateTime<Utc>> {
        let caps = self.pattern.captures(name)?;
        let stamp = format!("{}{}", &caps[1], &caps[2]);
        NaiveDateTime::parse_from_str(&stamp, "%Y%m%d%H%M%S")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Newest matching artifact. Non-matching names are skipped silently.
    /// Identical instants resolve to the smallest name, so the result does not
    /// depend on listing order.
    pub fn latest<'a, I>(&self, names: I) -> Option<(&'a str, DateTime<Utc>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, DateTime<Utc>)> = None;
        for name in names {
            let Some(at) = self.capture_instant(name) else {
                continue;
            };
            let replace = match best {
                None => true,
                Some((best_name, best_at)) => at > best_at || (at == best_at && name < best_name),
            };
            if replace {
                best = Some((name, at));
            }
        }
        best
    }
}
