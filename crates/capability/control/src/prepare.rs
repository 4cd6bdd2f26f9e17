//! 按需事务组装。

use api_contract::{TransactionMessage, TransactionPayload, WellControlChange};
use apex_protocol::{NodeAddressError, NodeAddressParser, ProtocolKind};
use apex_storage::{NodeRecord, PortRecord};

/// 微服务路由键：`{base}.{port_id}`；无端口时为基础键。
pub fn routing_key_for(base: &str, port_id: Option<i32>) -> String {
    match port_id {
        Some(port_id) => format!("{}.{}", base.trim_end_matches('.'), port_id),
        None => base.to_string(),
    }
}

/// 按协议族生成事务载荷。
///
/// 节点地址无法识别协议时退化为原始地址载荷。
pub fn build_payload(
    parser: &dyn NodeAddressParser,
    node_address: Option<&str>,
    change: &WellControlChange,
) -> TransactionPayload {
    let raw = || TransactionPayload::Raw {
        node_address: node_address.map(str::to_string),
        input: change.input.clone(),
    };

    let parsed = match parser.parse(node_address) {
        Ok(parsed) => parsed,
        Err(NodeAddressError::MissingAddress) => return raw(),
        Err(err) => {
            tracing::error!(
                target: "apex.control",
                transaction_id = change.transaction_id,
                error = %err,
                "node_address_parse_failed"
            );
            return raw();
        }
    };
    if !parsed.success {
        return raw();
    }

    match parsed.protocol {
        Some(protocol) if protocol.is_modbus() => TransactionPayload::ModbusWrite {
            protocol: protocol.name().to_string(),
            host: parsed.hostname,
            port: parsed.port,
            rtu: parsed.rtu_address.unwrap_or_default(),
            register_address: change.register_address,
            offset: parsed.offset.unwrap_or(0),
            value: change.value,
        },
        Some(ProtocolKind::Opc) => TransactionPayload::OpcWrite {
            host: parsed.hostname,
            opc_type: parsed.opc_type_name,
            tag: change
                .input
                .clone()
                .or_else(|| change.register_address.map(|address| address.to_string()))
                .unwrap_or_default(),
            value: change.value,
        },
        _ => raw(),
    }
}

/// 组装按需事务；非旧版端口附带路由键。
pub fn prepare_transaction(
    parser: &dyn NodeAddressParser,
    correlation_id: &str,
    change: &WellControlChange,
    node: &NodeRecord,
    port: Option<&PortRecord>,
    base_routing_key: &str,
) -> TransactionMessage {
    let legacy = port.is_some_and(|port| port.legacy);
    TransactionMessage {
        correlation_id: correlation_id.to_string(),
        transaction_id: change.transaction_id,
        asset_id: change.asset_id,
        node_id: node.node_id.clone(),
        port_id: node.port_id,
        task: change.task.clone(),
        requested_by: change.requested_by.clone(),
        date_request_ms: change.date_request_ms,
        routing_key: (!legacy).then(|| routing_key_for(base_routing_key, node.port_id)),
        payload: build_payload(parser, node.node_address.as_deref(), change),
    }
}
