//! Time zones read from a compiled zoneinfo database on disk.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use zoneinfo_compiled::{parse, TZData};

use crate::cal::zone::{FixedTimespan, FixedZones, TimeZone, ZoneProvider};
use crate::cal::zone::runtime::OwnedFixedTimespanSet;
use crate::error::{Error, Result};


/// A directory of compiled TZif files, such as `/usr/share/zoneinfo`.
///
/// Zones only change offset at the transitions their files list. Rules
/// for later years, in the footer of version 2 files, are not read.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ZoneinfoDatabase {
    directory: PathBuf,
}

impl ZoneinfoDatabase {

    /// A database in the given directory.
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self { directory: directory.into() }
    }

    /// The database the C library would use: the one named by the `TZDIR`
    /// environment variable, or `/usr/share/zoneinfo` if it isn’t set.
    pub fn from_env() -> Self {
        let directory = std::env::var("TZDIR")
            .unwrap_or_else(|_| "/usr/share/zoneinfo".to_string());
        Self::new(directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The path a zone’s file would be at, as long as its name can’t
    /// escape the database directory.
    fn path_of(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let safe = !name.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if safe { Some(self.directory.join(relative)) } else { None }
    }
}

impl Default for ZoneinfoDatabase {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ZoneProvider for ZoneinfoDatabase {
    fn zone_by_name(&self, name: &str) -> Result<TimeZone> {
        if let Ok(zone) = FixedZones.zone_by_name(name) {
            return Ok(zone);
        }

        let path = self.path_of(name).ok_or_else(|| Error::unknown(name))?;
        debug!("loading time zone {:?} from {:?}", name, path);

        let data = std::fs::read(&path).map_err(|_e| {
            debug!("cannot read {:?}: {}", path, _e);
            Error::unknown(name)
        })?;

        let tz = parse(data).map_err(|_e| {
            warn!("{:?} is not a valid zoneinfo file: {:?}", path, _e);
            Error::unknown(name)
        })?;

        let timespans = timespans_from(&tz);
        trace!("time zone {:?} has {} transitions", name, timespans.rest.len());
        Ok(TimeZone::from_timespans(Some(name.to_owned()), timespans))
    }
}

/// Copies the timespans of a compiled zone into our own set.
///
/// Only the transitions listed in the file are used. The POSIX rule in the
/// footer of newer files is not applied, so a zone keeps the offset of its
/// last listed transition forever after it.
fn timespans_from(tz: &TZData) -> OwnedFixedTimespanSet {
    let set = &tz.time_zone.fixed_timespans;

    OwnedFixedTimespanSet {
        first: FixedTimespan {
            offset: set.first.offset,
            is_dst: set.first.is_dst,
            name:   Cow::Owned(set.first.name.to_string()),
        },
        rest: set.rest.iter()
                      .map(|(at, t)| (*at, FixedTimespan {
                          offset: t.offset,
                          is_dst: t.is_dst,
                          name:   Cow::Owned(t.name.to_string()),
                      }))
                      .collect(),
    }
}
