use crate::PrettyLogError;
use std::str::FromStr;

/// Syslog facility, with the classic numeric codes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SyslogFacility {
    /// kernel messages.
    Kern = 0,
    /// user-level messages.
    #[default]
    User = 1,
    /// mail system.
    Mail = 2,
    /// system daemons.
    Daemon = 3,
    /// security/authorization messages.
    Auth = 4,
    /// messages generated internally by syslogd.
    Syslog = 5,
    /// line printer subsystem.
    Lpr = 6,
    /// network news subsystem.
    News = 7,
    /// UUCP subsystem.
    Uucp = 8,
    /// clock daemon.
    Cron = 9,
    /// private security/authorization messages.
    AuthPriv = 10,
    /// FTP daemon.
    Ftp = 11,
    /// local use 0.
    Local0 = 16,
    /// local use 1.
    Local1 = 17,
    /// local use 2.
    Local2 = 18,
    /// local use 3.
    Local3 = 19,
    /// local use 4.
    Local4 = 20,
    /// local use 5.
    Local5 = 21,
    /// local use 6.
    Local6 = 22,
    /// local use 7.
    Local7 = 23,
}
impl SyslogFacility {
    /// The facility code, not yet shifted into the priority value.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl FromStr for SyslogFacility {
    type Err = PrettyLogError;

    /// Accepts the conventional lower-case names, like `user` or `local3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "kern" => Self::Kern,
            "user" => Self::User,
            "mail" => Self::Mail,
            "daemon" => Self::Daemon,
            "auth" | "security" => Self::Auth,
            "syslog" => Self::Syslog,
            "lpr" => Self::Lpr,
            "news" => Self::News,
            "uucp" => Self::Uucp,
            "cron" => Self::Cron,
            "authpriv" => Self::AuthPriv,
            "ftp" => Self::Ftp,
            "local0" => Self::Local0,
            "local1" => Self::Local1,
            "local2" => Self::Local2,
            "local3" => Self::Local3,
            "local4" => Self::Local4,
            "local5" => Self::Local5,
            "local6" => Self::Local6,
            "local7" => Self::Local7,
            _ => return Err(PrettyLogError::InvalidFacility(s.to_string())),
        })
    }
}
