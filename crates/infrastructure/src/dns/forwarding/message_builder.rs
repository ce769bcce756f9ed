//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dnscheck_domain::{QueryFailure, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// A serialized query and the ID its response must carry.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a standard recursive query: random ID, RD set, one question.
    ///
    /// # Arguments
    /// * `name` - Name to query (e.g., "example.com" or a reverse-mapping name)
    /// * `record_type` - DNS record type
    pub fn build_query(name: &str, record_type: RecordType) -> Result<BuiltQuery, QueryFailure> {
        let name = Name::from_str(name).map_err(|e| {
            QueryFailure::Network(format!("cannot encode query name '{}': {}", name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok(BuiltQuery { id, bytes })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, QueryFailure> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            QueryFailure::Network(format!("failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
