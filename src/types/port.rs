//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` parses either an explicit list or a single inclusive range.

use crate::error::{InputError, InputResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = InputError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            InputError::InvalidPortSpec(format!("port {value} is out of range (1-65535)"))
        })
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// A parsed port specification.
///
/// Two forms are accepted, never mixed:
/// - Comma-separated list: "80", "80,443,8080" (order and duplicates kept)
/// - Inclusive range: "1-1024"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSpec {
    /// Explicit ports in the order given.
    List(Vec<Port>),
    /// Inclusive range with `start <= end`.
    Range { start: Port, end: Port },
}

impl PortSpec {
    /// Port specification used when none is given.
    pub const DEFAULT: &'static str = "1-1024";

    /// Parse a port specification string.
    pub fn parse(s: &str) -> InputResult<Self> {
        if !s.contains('-') {
            let ports = s
                .split(',')
                .map(|part| parse_port(part, "port"))
                .collect::<InputResult<Vec<_>>>()?;
            return Ok(Self::List(ports));
        }

        let bounds: Vec<&str> = s.split('-').collect();
        if bounds.len() != 2 {
            return Err(InputError::InvalidPortSpec(format!("invalid port range: {s}")));
        }

        let start = parse_port(bounds[0], "start port")?;
        let end = parse_port(bounds[1], "end port")?;
        if start > end {
            return Err(InputError::InvalidPortSpec(format!(
                "invalid port range: start ({start}) > end ({end})"
            )));
        }

        Ok(Self::Range { start, end })
    }

    /// Expand into the ordered list of ports this specification denotes.
    pub fn to_ports(&self) -> Vec<Port> {
        match self {
            Self::List(ports) => ports.clone(),
            Self::Range { start, end } => (start.0..=end.0).map(Port).collect(),
        }
    }
}

impl Default for PortSpec {
    fn default() -> Self {
        Self::Range {
            start: Port(1),
            end: Port(1024),
        }
    }
}

impl FromStr for PortSpec {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(ports) => {
                let parts: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            Self::Range { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

/// Parse one base-10 segment into a port, naming the segment on failure.
fn parse_port(segment: &str, what: &str) -> InputResult<Port> {
    let value: u16 = segment
        .parse()
        .map_err(|_| InputError::InvalidPortSpec(format!("invalid {what}: {segment:?}")))?;
    Port::try_from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(spec: &str) -> Vec<u16> {
        PortSpec::parse(spec)
            .unwrap()
            .to_ports()
            .into_iter()
            .map(u16::from)
            .collect()
    }

    fn assert_invalid(spec: &str) {
        assert!(
            matches!(PortSpec::parse(spec), Err(InputError::InvalidPortSpec(_))),
            "expected {spec:?} to be rejected"
        );
    }

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_parse_single_port() {
        assert_eq!(ports("80"), vec![80]);
    }

    #[test]
    fn test_parse_list_keeps_order_and_duplicates() {
        assert_eq!(ports("80,443,8080"), vec![80, 443, 8080]);
        assert_eq!(ports("443,80,443"), vec![443, 80, 443]);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(ports("80-82"), vec![80, 81, 82]);
        assert_eq!(ports("80-80"), vec![80]);
        assert_eq!(PortSpec::parse("1-65535").unwrap().to_ports().len(), 65535);
    }

    #[test]
    fn test_reversed_range() {
        assert_invalid("100-80");
    }

    #[test]
    fn test_mixed_syntax() {
        assert_invalid("80,443-8080");
        assert_invalid("80-443,8080");
    }

    #[test]
    fn test_too_many_bounds() {
        assert_invalid("80-90-100");
    }

    #[test]
    fn test_non_numeric_segments() {
        assert_invalid("abc");
        assert_invalid("80,http");
        assert_invalid("a-100");
        assert_invalid("1-b");
        assert_invalid("");
        assert_invalid("80,");
        assert_invalid("80, 443");
    }

    #[test]
    fn test_out_of_range_ports() {
        assert_invalid("0");
        assert_invalid("70000");
        assert_invalid("0-10");
        assert_invalid("1-65536");
    }

    #[test]
    fn test_error_names_segment() {
        let err = PortSpec::parse("22,ssh").unwrap_err();
        assert!(err.to_string().contains("ssh"));

        let err = PortSpec::parse("1-x").unwrap_err();
        assert!(err.to_string().contains("end port"));
    }

    #[test]
    fn test_default_spec() {
        assert_eq!(PortSpec::default(), PortSpec::parse(PortSpec::DEFAULT).unwrap());
        assert_eq!(PortSpec::default().to_ports().len(), 1024);
    }

    #[test]
    fn test_display() {
        assert_eq!(PortSpec::parse("22,80").unwrap().to_string(), "22,80");
        assert_eq!(PortSpec::parse("1-100").unwrap().to_string(), "1-100");
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(PortSpec::parse("10-20"), PortSpec::parse("10-20"));
    }
}
