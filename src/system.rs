//! System-dependent functions, or anything that this library is unable to
//! do without help from the OS.

use std::ffi::OsStr;
use std::path::Path;


#[cfg(target_os = "redox")]
extern crate syscall as redox_syscall;


#[cfg(any(target_os = "macos", target_os = "ios"))]
extern {
    fn gettimeofday(tp: *mut libc::timeval, tzp: *mut libc::timezone) -> libc::c_int;
}

#[cfg(all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "redox")))]
use libc::clock_gettime;


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) unsafe fn sys_time() -> (i64, i32) {
    use std::ptr::null_mut;

    let mut tv = libc::timeval { tv_sec: 0, tv_usec: 0 };
    let _ = gettimeofday(&mut tv, null_mut());
    (tv.tv_sec as i64, tv.tv_usec as i32 * 1000)
}

#[cfg(windows)] use winapi::shared::minwindef::FILETIME;
#[cfg(windows)] const HECTONANOSECS_IN_SEC: i64 = 10_000_000;
#[cfg(windows)] const HECTONANOSEC_TO_UNIX_EPOCH: i64 = 11_644_473_600 * HECTONANOSECS_IN_SEC;

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(windows)]
pub(crate) unsafe fn sys_time() -> (i64, i32) {
    use std::mem;
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;
    let mut ft = mem::zeroed();

    GetSystemTimeAsFileTime(&mut ft);
    (file_time_to_unix_seconds(&ft), file_time_to_nsec(&ft))
}

#[cfg(windows)]
fn file_time_to_nsec(ft: &FILETIME) -> i32 {
    let t = file_time_as_u64(ft) as i64;
    ((t % HECTONANOSECS_IN_SEC) * 100) as i32
}

#[cfg(windows)]
fn file_time_to_unix_seconds(ft: &FILETIME) -> i64 {
    let t = file_time_as_u64(ft) as i64;
    (t - HECTONANOSEC_TO_UNIX_EPOCH) / HECTONANOSECS_IN_SEC
}

#[cfg(windows)]
fn file_time_as_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "redox")))]
pub(crate) unsafe fn sys_time() -> (i64, i32) {
    let mut tv = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let _ = clock_gettime(libc::CLOCK_REALTIME, &mut tv);
    (tv.tv_sec as i64, tv.tv_nsec as i32)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(target_os = "wasi")]
pub(crate) unsafe fn sys_time() -> (i64, i32) {
    let nanos = wasi::clock_time_get(wasi::CLOCKID_REALTIME, 1).unwrap_or(0) as i64;
    (nanos / 1_000_000_000, (nanos % 1_000_000_000) as i32)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the nanosecond of the second.
#[cfg(target_os = "redox")]
pub(crate) fn sys_time() -> (i64, i32) {
   let mut ts = redox_syscall::TimeSpec::default();
   let realtime_clock = redox_syscall::CLOCK_REALTIME;
   let _ = redox_syscall::clock_gettime(realtime_clock, &mut ts);
   (ts.tv_sec, ts.tv_nsec)
}

/// Attempts to determine the system’s current time zone. There’s no
/// guaranteed way to do this, so this function returns `None` if no
/// timezone could be found.
pub fn sys_timezone() -> Option<String> {
    use std::fs::read_link;

    if let Ok(name) = std::env::var("TZ") {
        let name = name.trim_start_matches(':');
        if !name.is_empty() && !name.starts_with('/') {
            return Some(name.to_owned());
        }
    }

    let link = read_link("/etc/localtime").ok()?;
    extract_timezone(&*link).filter(|tz| !tz.is_empty())
}

/// Given a path, returns whether a valid zoneinfo timezone name can be
/// detected at the end of that path.
fn extract_timezone(path: &Path) -> Option<String> {
    let mut bits = Vec::new();

    for pathlet in path.iter().rev().take_while(|c| is_tz_component(c)) {
        bits.insert(0, pathlet.to_str()?);
    }

    Some(bits.join("/"))
}

/// Returns whether the input string could be used as a component of a
/// zoneinfo timezone name, which in this case is whether its first
/// character is a capital letter.
fn is_tz_component(component: &OsStr) -> bool {
    component.to_str()
             .and_then(|s| s.chars().next())
             .map_or(false, char::is_uppercase)
}


#[cfg(test)]
mod test {
    use super::{sys_time, extract_timezone};
    use std::path::Path;

    #[test]
    #[cfg_attr(target_os = "redox", allow(unused_unsafe))]
    fn sanity_check() {
        assert!((0, 0) != unsafe { sys_time() })
    }

    #[test]
    fn two() {
        let timezone = extract_timezone(Path::new("/usr/share/zoneinfo/Europe/London"));
        assert_eq!(timezone, Some("Europe/London".to_string()));
    }

    #[test]
    fn one() {
        let timezone = extract_timezone(Path::new("/usr/share/zoneinfo/CST6CDT"));
        assert_eq!(timezone, Some("CST6CDT".to_string()));
    }

    #[test]
    fn none() {
        let timezone = extract_timezone(Path::new("/etc/localtime"));
        assert_eq!(timezone, Some(String::new()));
    }
}
