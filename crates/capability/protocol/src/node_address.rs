//! 节点地址解析

use crate::error::NodeAddressError;
use crate::types::{ParsedNodeAddress, ProtocolKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 节点地址解析接口
///
/// 旧版字符串格式后续可替换为结构化连接描述，调用方只依赖此接口。
pub trait NodeAddressParser: Send + Sync {
    fn parse(&self, address: Option<&str>) -> Result<ParsedNodeAddress, NodeAddressError>;
}

static NODE_ADDRESS_GRAMMAR: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<protocol>[A-Za-z])(?P<host>[^*|+]+)(?:\*(?P<opc>[^|+]+))?(?:\|(?P<port>[^|+]*))?\|(?P<rtu>[^|+]+)|(?P<bare>[^|*+]+))(?:\+(?P<offset>.*))?$",
    )
});

/// 基于正则的节点地址解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexNodeAddressParser;

impl RegexNodeAddressParser {
    pub fn new() -> Self {
        Self
    }
}

fn group(captures: &Captures<'_>, name: &str) -> Option<String> {
    captures
        .name(name)
        .map(|m| m.as_str().to_string())
        .filter(|value| !value.is_empty())
}

impl NodeAddressParser for RegexNodeAddressParser {
    fn parse(&self, address: Option<&str>) -> Result<ParsedNodeAddress, NodeAddressError> {
        let address = address.ok_or(NodeAddressError::MissingAddress)?;
        let grammar = NODE_ADDRESS_GRAMMAR.as_ref().map_err(|err| {
            tracing::error!(target: "apex.protocol", error = %err, "node_address_grammar_invalid");
            NodeAddressError::Grammar(err.to_string())
        })?;

        let Some(captures) = grammar.captures(address) else {
            tracing::debug!(target: "apex.protocol", address, "node_address_unmatched");
            return Ok(ParsedNodeAddress::unmatched());
        };

        let mut parsed = ParsedNodeAddress {
            success: true,
            ..ParsedNodeAddress::default()
        };

        if let Some(bare) = group(&captures, "bare") {
            parsed.rtu_address = Some(bare);
        } else {
            parsed.hostname = group(&captures, "host");
            parsed.opc_type_name = group(&captures, "opc");
            parsed.rtu_address = group(&captures, "rtu");

            let protocol_char = captures
                .name("protocol")
                .and_then(|m| m.as_str().chars().next());
            parsed.protocol = protocol_char.and_then(ProtocolKind::from_char);
            if parsed.protocol.is_none() {
                tracing::debug!(
                    target: "apex.protocol",
                    address,
                    protocol = ?protocol_char,
                    "node_address_protocol_unknown"
                );
                parsed.success = false;
            }

            if let Some(port) = group(&captures, "port") {
                match port.trim().parse::<u16>() {
                    Ok(port) => parsed.port = Some(port),
                    Err(_) => {
                        tracing::debug!(target: "apex.protocol", address, port = %port, "node_address_port_invalid");
                        parsed.success = false;
                    }
                }
            }
        }

        if let Some(offset) = captures.name("offset").map(|m| m.as_str()) {
            match offset.trim().parse::<i32>() {
                Ok(offset) => parsed.offset = Some(offset),
                Err(_) => {
                    tracing::debug!(target: "apex.protocol", address, offset, "node_address_offset_invalid");
                    parsed.success = false;
                }
            }
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(address: &str) -> ParsedNodeAddress {
        RegexNodeAddressParser::new()
            .parse(Some(address))
            .expect("parse")
    }

    #[test]
    fn modbus_host_and_rtu() {
        let parsed = parse("i10.0.0.5|7");
        assert!(parsed.success);
        assert_eq!(parsed.protocol, Some(ProtocolKind::Modbus));
        assert_eq!(parsed.hostname.as_deref(), Some("10.0.0.5"));
        assert_eq!(parsed.rtu_address.as_deref(), Some("7"));
        assert!(parsed.port.is_none());
    }

    #[test]
    fn tcp_with_port_and_offset() {
        let parsed = parse("mplc-7.field|502|3+-1");
        assert!(parsed.success);
        assert_eq!(parsed.protocol, Some(ProtocolKind::ModbusTcp));
        assert_eq!(parsed.port, Some(502));
        assert_eq!(parsed.rtu_address.as_deref(), Some("3"));
        assert_eq!(parsed.offset, Some(-1));
    }

    #[test]
    fn opc_type_name() {
        let parsed = parse("oopc-server*Kepware.KEPServerEX.V6|Channel1.Device1");
        assert!(parsed.success);
        assert_eq!(parsed.protocol, Some(ProtocolKind::Opc));
        assert_eq!(parsed.hostname.as_deref(), Some("opc-server"));
        assert_eq!(
            parsed.opc_type_name.as_deref(),
            Some("Kepware.KEPServerEX.V6")
        );
        assert_eq!(parsed.rtu_address.as_deref(), Some("Channel1.Device1"));
    }

    #[test]
    fn bare_rtu_with_offset() {
        let parsed = parse("12+100");
        assert!(parsed.success);
        assert!(parsed.protocol.is_none());
        assert!(parsed.hostname.is_none());
        assert_eq!(parsed.rtu_address.as_deref(), Some("12"));
        assert_eq!(parsed.offset, Some(100));
    }

    #[test]
    fn unknown_protocol_keeps_groups() {
        let parsed = parse("x10.0.0.5|7");
        assert!(!parsed.success);
        assert!(parsed.protocol.is_none());
        assert_eq!(parsed.hostname.as_deref(), Some("10.0.0.5"));
        assert_eq!(parsed.rtu_address.as_deref(), Some("7"));
    }

    #[test]
    fn bad_port_and_offset_fail_softly() {
        let parsed = parse("mhost|99999|4");
        assert!(!parsed.success);
        assert!(parsed.port.is_none());
        assert_eq!(parsed.rtu_address.as_deref(), Some("4"));

        let parsed = parse("4+abc");
        assert!(!parsed.success);
        assert_eq!(parsed.rtu_address.as_deref(), Some("4"));
    }

    #[test]
    fn unmatched_string() {
        let parsed = parse("|||");
        assert!(!parsed.success);
        assert_eq!(parsed, ParsedNodeAddress::unmatched());
    }

    #[test]
    fn missing_address_is_an_error() {
        let result = RegexNodeAddressParser::new().parse(None);
        assert!(matches!(result, Err(NodeAddressError::MissingAddress)));
    }
}
