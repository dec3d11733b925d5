//! Linux capability names.

use std::fmt;
use std::str::FromStr;

use bulwark_common::{BulwarkError, BulwarkResult};
use serde::{Deserialize, Serialize};

/// Linux capability.
///
/// Serialized without the `CAP_` prefix (`KILL`, `SYS_CHROOT`), which is how
/// constraint objects spell them. Parsing accepts either spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    /// CAP_CHOWN
    Chown,
    /// CAP_DAC_OVERRIDE
    DacOverride,
    /// CAP_DAC_READ_SEARCH
    DacReadSearch,
    /// CAP_FOWNER
    Fowner,
    /// CAP_FSETID
    Fsetid,
    /// CAP_KILL
    Kill,
    /// CAP_SETGID
    Setgid,
    /// CAP_SETUID
    Setuid,
    /// CAP_SETPCAP
    Setpcap,
    /// CAP_LINUX_IMMUTABLE
    LinuxImmutable,
    /// CAP_NET_BIND_SERVICE
    NetBindService,
    /// CAP_NET_BROADCAST
    NetBroadcast,
    /// CAP_NET_ADMIN
    NetAdmin,
    /// CAP_NET_RAW
    NetRaw,
    /// CAP_IPC_LOCK
    IpcLock,
    /// CAP_IPC_OWNER
    IpcOwner,
    /// CAP_SYS_MODULE
    SysModule,
    /// CAP_SYS_RAWIO
    SysRawio,
    /// CAP_SYS_CHROOT
    SysChroot,
    /// CAP_SYS_PTRACE
    SysPtrace,
    /// CAP_SYS_PACCT
    SysPacct,
    /// CAP_SYS_ADMIN
    SysAdmin,
    /// CAP_SYS_BOOT
    SysBoot,
    /// CAP_SYS_NICE
    SysNice,
    /// CAP_SYS_RESOURCE
    SysResource,
    /// CAP_SYS_TIME
    SysTime,
    /// CAP_SYS_TTY_CONFIG
    SysTtyConfig,
    /// CAP_MKNOD
    Mknod,
    /// CAP_LEASE
    Lease,
    /// CAP_AUDIT_WRITE
    AuditWrite,
    /// CAP_AUDIT_CONTROL
    AuditControl,
    /// CAP_SETFCAP
    Setfcap,
}

impl Capability {
    /// Every known capability.
    pub const ALL: [Self; 32] = [
        Self::Chown,
        Self::DacOverride,
        Self::DacReadSearch,
        Self::Fowner,
        Self::Fsetid,
        Self::Kill,
        Self::Setgid,
        Self::Setuid,
        Self::Setpcap,
        Self::LinuxImmutable,
        Self::NetBindService,
        Self::NetBroadcast,
        Self::NetAdmin,
        Self::NetRaw,
        Self::IpcLock,
        Self::IpcOwner,
        Self::SysModule,
        Self::SysRawio,
        Self::SysChroot,
        Self::SysPtrace,
        Self::SysPacct,
        Self::SysAdmin,
        Self::SysBoot,
        Self::SysNice,
        Self::SysResource,
        Self::SysTime,
        Self::SysTtyConfig,
        Self::Mknod,
        Self::Lease,
        Self::AuditWrite,
        Self::AuditControl,
        Self::Setfcap,
    ];

    /// Capability name as it appears in constraint objects.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Chown => "CHOWN",
            Self::DacOverride => "DAC_OVERRIDE",
            Self::DacReadSearch => "DAC_READ_SEARCH",
            Self::Fowner => "FOWNER",
            Self::Fsetid => "FSETID",
            Self::Kill => "KILL",
            Self::Setgid => "SETGID",
            Self::Setuid => "SETUID",
            Self::Setpcap => "SETPCAP",
            Self::LinuxImmutable => "LINUX_IMMUTABLE",
            Self::NetBindService => "NET_BIND_SERVICE",
            Self::NetBroadcast => "NET_BROADCAST",
            Self::NetAdmin => "NET_ADMIN",
            Self::NetRaw => "NET_RAW",
            Self::IpcLock => "IPC_LOCK",
            Self::IpcOwner => "IPC_OWNER",
            Self::SysModule => "SYS_MODULE",
            Self::SysRawio => "SYS_RAWIO",
            Self::SysChroot => "SYS_CHROOT",
            Self::SysPtrace => "SYS_PTRACE",
            Self::SysPacct => "SYS_PACCT",
            Self::SysAdmin => "SYS_ADMIN",
            Self::SysBoot => "SYS_BOOT",
            Self::SysNice => "SYS_NICE",
            Self::SysResource => "SYS_RESOURCE",
            Self::SysTime => "SYS_TIME",
            Self::SysTtyConfig => "SYS_TTY_CONFIG",
            Self::Mknod => "MKNOD",
            Self::Lease => "LEASE",
            Self::AuditWrite => "AUDIT_WRITE",
            Self::AuditControl => "AUDIT_CONTROL",
            Self::Setfcap => "SETFCAP",
        }
    }

    /// Kernel spelling, e.g. `CAP_KILL`.
    #[must_use]
    pub fn kernel_name(&self) -> String {
        format!("CAP_{}", self.name())
    }

    /// Parse a capability name in either spelling, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known capability.
    pub fn parse(name: &str) -> BulwarkResult<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("CAP_").unwrap_or(upper.as_str());

        Self::ALL
            .into_iter()
            .find(|cap| cap.name() == bare)
            .ok_or_else(|| BulwarkError::UnknownCapability {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = BulwarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Capability {
    type Error = BulwarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_both_spellings_parse() {
        assert_eq!(Capability::parse("KILL").unwrap(), Capability::Kill);
        assert_eq!(Capability::parse("CAP_KILL").unwrap(), Capability::Kill);
        assert_eq!(Capability::parse("sys_chroot").unwrap(), Capability::SysChroot);
        assert!(Capability::parse("CAP_TELEPORT").is_err());
    }

    #[test]
    fn test_kernel_name() {
        assert_eq!(Capability::Setuid.kernel_name(), "CAP_SETUID");
    }

    #[test]
    fn test_serde_uses_bare_names() {
        let json = serde_json::to_string(&vec![Capability::Mknod, Capability::Setgid]).unwrap();
        assert_eq!(json, r#"["MKNOD","SETGID"]"#);

        let caps: Vec<Capability> = serde_json::from_str(r#"["CAP_NET_RAW","kill"]"#).unwrap();
        assert_eq!(caps, vec![Capability::NetRaw, Capability::Kill]);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Capability::ALL.iter().map(Capability::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Capability::ALL.len());
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(cap in proptest::sample::select(Capability::ALL.to_vec())) {
            prop_assert_eq!(cap.to_string().parse::<Capability>().unwrap(), cap);
            prop_assert_eq!(Capability::parse(&cap.kernel_name()).unwrap(), cap);
        }
    }
}
