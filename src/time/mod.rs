//! Gateway timestamp handling.
//!
//! The gateway writes timestamps as `YYYY-MM-DD HH:MM:SS.ffffff±HH:MM` (with
//! `Z` for UTC). Bucket calls on older gateways omit the offset entirely;
//! those values are read in a [`ZoneSpec`] chosen when the client is built.
//!
//! Serde cannot pass parameters into `Deserialize`, so the client installs
//! its zone for the duration of each (synchronous) decode with [`with_zone`].
//! Outside such a scope offset-less values are read in the local zone.

use crate::error::{ConfigurationError, DecodeError, EncodeError};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

/// Layout used on the wire, minus the offset which is appended separately.
pub const RADOS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Offset-less layout used by bucket calls.
pub const RADOS_BUCKET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const PARSE_WITH_OFFSET: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Zone used to interpret offset-less timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSpec {
    /// The process's local zone.
    #[default]
    Local,
    /// UTC.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
    /// A zone from the IANA database, e.g. `America/Chicago`. Daylight
    /// saving rules apply.
    Named(Tz),
}

impl ZoneSpec {
    /// Resolve a zone name: `Local`, `UTC`/`Z`, an offset like `+02:00`, or
    /// an IANA name such as `Europe/Berlin`.
    pub fn parse(name: &str) -> Result<Self, ConfigurationError> {
        let trimmed = name.trim();
        let invalid = || ConfigurationError::InvalidTimeZone {
            zone: name.to_string(),
        };

        match trimmed {
            "" | "Local" | "local" => Ok(ZoneSpec::Local),
            "UTC" | "utc" | "Z" | "GMT" => Ok(ZoneSpec::Utc),
            _ if trimmed.starts_with(['+', '-']) => {
                let (sign, rest) = trimmed.split_at(1);
                let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
                let hours: i32 = hours.parse().map_err(|_| invalid())?;
                let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
                if !(0..60).contains(&minutes) || hours < 0 {
                    return Err(invalid());
                }
                let seconds = hours
                    .checked_mul(3600)
                    .and_then(|h| h.checked_add(minutes * 60))
                    .ok_or_else(invalid)?;
                let seconds = if sign == "-" { -seconds } else { seconds };
                FixedOffset::east_opt(seconds)
                    .map(ZoneSpec::Fixed)
                    .ok_or_else(invalid)
            }
            _ => trimmed
                .parse::<Tz>()
                .map(ZoneSpec::Named)
                .map_err(|_| invalid()),
        }
    }

    /// Attach this zone to a naive wall-clock time.
    ///
    /// Ambiguous local times resolve to the earlier instant.
    pub fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            ZoneSpec::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
            ZoneSpec::Utc => Some(Utc.from_utc_datetime(naive).fixed_offset()),
            ZoneSpec::Fixed(offset) => offset.from_local_datetime(naive).single(),
            ZoneSpec::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
        }
    }
}

impl FromStr for ZoneSpec {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneSpec::parse(s)
    }
}

thread_local! {
    static DECODE_ZONE: Cell<Option<ZoneSpec>> = const { Cell::new(None) };
}

struct ZoneGuard(Option<ZoneSpec>);

impl Drop for ZoneGuard {
    fn drop(&mut self) {
        DECODE_ZONE.with(|z| z.set(self.0));
    }
}

/// Run `f` with `zone` as the zone for offset-less timestamps decoded on this
/// thread. The previous zone is restored afterwards, even on panic.
pub fn with_zone<R>(zone: ZoneSpec, f: impl FnOnce() -> R) -> R {
    let previous = DECODE_ZONE.with(|z| z.replace(Some(zone)));
    let _guard = ZoneGuard(previous);
    f()
}

/// The zone currently in effect for decoding on this thread.
pub fn current_zone() -> ZoneSpec {
    DECODE_ZONE.with(|z| z.get()).unwrap_or_default()
}

/// A timestamp in the gateway's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RadosTime(DateTime<FixedOffset>);

impl RadosTime {
    /// Wrap a datetime.
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        RadosTime(dt)
    }

    /// Current time in UTC.
    pub fn now() -> Self {
        RadosTime(Utc::now().fixed_offset())
    }

    /// The wrapped datetime.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Convert to UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Parse either layout, reading offset-less values in the zone in effect
    /// for this thread (see [`with_zone`]).
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        Self::parse_in(text, current_zone())
    }

    /// Parse either layout, reading offset-less values in `zone`.
    pub fn parse_in(text: &str, zone: ZoneSpec) -> Result<Self, DecodeError> {
        let text = text.trim();
        let normalized = match text.strip_suffix('Z') {
            Some(head) => format!("{head}+00:00"),
            None => text.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_str(&normalized, PARSE_WITH_OFFSET) {
            return Ok(RadosTime(dt));
        }

        let naive = NaiveDateTime::parse_from_str(text, RADOS_BUCKET_TIME_FORMAT).map_err(|e| {
            DecodeError::InvalidTime {
                value: text.to_string(),
                message: e.to_string(),
            }
        })?;

        zone.localize(&naive)
            .map(RadosTime)
            .ok_or_else(|| DecodeError::InvalidTime {
                value: text.to_string(),
                message: "time does not exist in the configured zone".to_string(),
            })
    }

    /// Render in the wire format. Fails for years outside `[0, 9999]`.
    pub fn format(&self) -> Result<String, EncodeError> {
        let year = chrono::Datelike::year(&self.0);
        if !(0..10000).contains(&year) {
            return Err(EncodeError::TimeOutOfRange { year });
        }

        let mut out = self.0.format(RADOS_TIME_FORMAT).to_string();
        if self.0.offset().local_minus_utc() == 0 {
            out.push('Z');
        } else {
            out.push_str(&self.0.format("%:z").to_string());
        }
        Ok(out)
    }
}

impl From<DateTime<FixedOffset>> for RadosTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        RadosTime(dt)
    }
}

impl From<DateTime<Utc>> for RadosTime {
    fn from(dt: DateTime<Utc>) -> Self {
        RadosTime(dt.fixed_offset())
    }
}

impl FromStr for RadosTime {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RadosTime::parse(s)
    }
}

impl fmt::Display for RadosTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0.to_rfc3339()),
        }
    }
}

impl Serialize for RadosTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.format().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for RadosTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = RadosTime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a timestamp like 2017-03-16 04:00:00.000000Z")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RadosTime, E> {
                RadosTime::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
