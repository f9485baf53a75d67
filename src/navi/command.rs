//! Vendor CLI configuration and command construction.

use std::fmt;

/// Default install location of the Navisphere secure CLI.
pub const DEFAULT_NAVISECCLI_PATH: &str = "/opt/Navisphere/bin/naviseccli";

/// Number of leading `storagepool -list` lines that hold the capacity fields.
pub const STORAGE_POOL_HEADER_LINES: usize = 26;

/// Marker present on every LUN header line of `getlun` output.
pub const LOGICAL_UNIT_MARKER: &str = "LOGICAL";

/// Connection settings for the storage array manager.
#[derive(Clone)]
pub struct NaviCliConfig {
    /// Path to the `naviseccli` binary
    pub binary: String,
    /// Address of the VNX manager
    pub host: String,
    /// User used to access the manager
    pub user: String,
    /// Password used to access the manager
    pub password: String,
    /// Login scope (0 = global)
    pub scope: u8,
    /// Storage pool to report on
    pub pool_name: String,
}

impl Default for NaviCliConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_NAVISECCLI_PATH.to_string(),
            host: "10.10.10.10".to_string(),
            user: "user".to_string(),
            password: "password".to_string(),
            scope: 0,
            pool_name: "pool".to_string(),
        }
    }
}

impl fmt::Debug for NaviCliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaviCliConfig")
            .field("binary", &self.binary)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"****")
            .field("scope", &self.scope)
            .field("pool_name", &self.pool_name)
            .finish()
    }
}

impl NaviCliConfig {
    /// Create a configuration for the given manager and credentials.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        pool_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            pool_name: pool_name.into(),
            ..Default::default()
        }
    }

    /// Set the path of the `naviseccli` binary.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the login scope.
    pub fn with_scope(mut self, scope: u8) -> Self {
        self.scope = scope;
        self
    }

    /// Arguments shared by every invocation: manager, credentials, scope.
    fn connection_args(&self) -> Vec<String> {
        vec![
            "-h".to_string(),
            self.host.clone(),
            "-user".to_string(),
            self.user.clone(),
            "-password".to_string(),
            self.password.clone(),
            "-Scope".to_string(),
            self.scope.to_string(),
        ]
    }

    /// `storagepool -list -name <pool>`, cut down to the capacity header.
    pub fn storage_pool_command(&self) -> VendorCommand {
        let mut args = self.connection_args();
        args.extend(
            ["storagepool", "-list", "-name"]
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(self.pool_name.clone());

        self.command("storagepool", args, OutputFilter::Head(STORAGE_POOL_HEADER_LINES))
    }

    /// `getlun`, reduced to the number of LUN header lines.
    pub fn lun_count_command(&self) -> VendorCommand {
        let mut args = self.connection_args();
        args.push("getlun".to_string());

        self.command("getlun", args, OutputFilter::CountLines(LOGICAL_UNIT_MARKER))
    }

    fn command(&self, label: &'static str, args: Vec<String>, filter: OutputFilter) -> VendorCommand {
        VendorCommand {
            label,
            program: self.binary.clone(),
            args,
            filter,
            secret: Some(self.password.clone()),
        }
    }
}

/// Reduction applied to the stdout of a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFilter {
    /// Pass the output through unchanged
    #[default]
    None,
    /// Keep the first `n` lines, like `head -n`
    Head(usize),
    /// Count the lines containing a pattern, like `grep PATTERN | wc -l`
    CountLines(&'static str),
}

impl OutputFilter {
    /// Reduce raw command output.
    pub fn apply(&self, output: &str) -> String {
        match self {
            OutputFilter::None => output.to_string(),
            OutputFilter::Head(n) => output
                .lines()
                .take(*n)
                .flat_map(|line| [line, "\n"])
                .collect(),
            OutputFilter::CountLines(pattern) => {
                let count = output.lines().filter(|line| line.contains(pattern)).count();
                format!("{count}\n")
            }
        }
    }
}

/// A fully resolved subprocess invocation.
///
/// The program is spawned directly, never through a shell.
#[derive(Clone, PartialEq, Eq)]
pub struct VendorCommand {
    /// Short name used in logs
    pub label: &'static str,
    /// Executable to spawn
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Reduction applied to stdout once the program exits successfully
    pub filter: OutputFilter,
    secret: Option<String>,
}

impl VendorCommand {
    /// Create an unfiltered command with no secret to redact.
    pub fn new(label: &'static str, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            label,
            program: program.into(),
            args,
            filter: OutputFilter::None,
            secret: None,
        }
    }

    /// Set the reduction applied to the command's output.
    pub fn with_filter(mut self, filter: OutputFilter) -> Self {
        self.filter = filter;
        self
    }

    fn redacted_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(move |arg| match &self.secret {
            Some(secret) if !secret.is_empty() && arg == secret => "****",
            _ => arg.as_str(),
        })
    }
}

impl fmt::Display for VendorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.redacted_args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl fmt::Debug for VendorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorCommand")
            .field("label", &self.label)
            .field("program", &self.program)
            .field("args", &self.redacted_args().collect::<Vec<_>>())
            .field("filter", &self.filter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NaviCliConfig {
        NaviCliConfig::new("192.0.2.10", "admin", "s3cret", "Pool 0")
    }

    #[test]
    fn test_storage_pool_command_layout() {
        let cmd = config().storage_pool_command();
        assert_eq!(cmd.program, DEFAULT_NAVISECCLI_PATH);
        assert_eq!(
            cmd.args,
            [
                "-h", "192.0.2.10", "-user", "admin", "-password", "s3cret", "-Scope", "0",
                "storagepool", "-list", "-name", "Pool 0",
            ]
        );
        assert_eq!(cmd.filter, OutputFilter::Head(26));
    }

    #[test]
    fn test_lun_count_command_layout() {
        let cmd = config().with_scope(1).lun_count_command();
        assert_eq!(cmd.args.last().map(String::as_str), Some("getlun"));
        assert!(cmd.args.contains(&"1".to_string()));
        assert_eq!(cmd.filter, OutputFilter::CountLines("LOGICAL"));
    }

    #[test]
    fn test_user_values_are_single_arguments() {
        let cmd = NaviCliConfig::new("h; rm -rf /", "u", "p", "$(reboot)").storage_pool_command();
        assert_eq!(cmd.program, DEFAULT_NAVISECCLI_PATH);
        assert_eq!(cmd.args[1], "h; rm -rf /");
        assert_eq!(cmd.args.last().map(String::as_str), Some("$(reboot)"));
    }

    #[test]
    fn test_password_is_redacted() {
        let cmd = config().lun_count_command();
        let shown = cmd.to_string();
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("-password ****"));
        assert!(!format!("{:?}", cmd).contains("s3cret"));
        assert!(!format!("{:?}", config()).contains("s3cret"));
    }

    #[test]
    fn test_custom_binary() {
        let cmd = config().with_binary("/usr/local/bin/naviseccli").lun_count_command();
        assert_eq!(cmd.program, "/usr/local/bin/naviseccli");
    }

    #[test]
    fn test_head_filter_keeps_leading_lines() {
        let text = "a: 1\nb: 2\nc: 3\n";
        assert_eq!(OutputFilter::Head(2).apply(text), "a: 1\nb: 2\n");
        assert_eq!(OutputFilter::Head(10).apply(text), text);
    }

    #[test]
    fn test_count_filter_matches_wc_output() {
        let text = "LOGICAL UNIT NUMBER 0\nName:  LUN 0\nLOGICAL UNIT NUMBER 1\n";
        assert_eq!(OutputFilter::CountLines("LOGICAL").apply(text), "2\n");
        assert_eq!(OutputFilter::CountLines("LOGICAL").apply(""), "0\n");
    }
}
