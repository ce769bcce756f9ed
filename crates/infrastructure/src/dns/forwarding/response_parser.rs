use bytes::Bytes;
use dnscheck_domain::QueryFailure;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType as HickoryRecordType;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Presentation form of every answer whose type matches the question,
    /// in the order the server sent them.
    pub values: Vec<String>,

    /// All answer records, including CNAME hops and other types.
    pub answer_count: usize,
}

impl DnsResponse {
    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.values.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    /// Maps the response onto a query outcome.
    ///
    /// NXDOMAIN and an empty NOERROR answer are both "no such record"; any
    /// other non-zero RCODE is a server failure.
    pub fn into_values(self) -> Result<Vec<String>, QueryFailure> {
        match self.rcode {
            ResponseCode::NoError if !self.values.is_empty() => Ok(self.values),
            ResponseCode::NoError => Err(QueryFailure::NoSuchRecord(
                "NOERROR with no matching answers".to_string(),
            )),
            ResponseCode::NXDomain => Err(QueryFailure::NoSuchRecord("NXDOMAIN".to_string())),
            rcode => Err(QueryFailure::ServerFailure(
                ResponseParser::rcode_to_status(rcode).to_string(),
            )),
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a DNS response, keeping answers of `expected` type.
    pub fn parse_bytes(
        response_bytes: Bytes,
        expected: HickoryRecordType,
    ) -> Result<DnsResponse, QueryFailure> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            QueryFailure::Network(format!("failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let values: Vec<String> = message
            .answers()
            .iter()
            .filter(|record| record.record_type() == expected)
            .map(|record| record.data().to_string())
            .collect();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            matching = values.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            values,
            answer_count: message.answers().len(),
        })
    }

    pub fn parse(
        response_bytes: &[u8],
        expected: HickoryRecordType,
    ) -> Result<DnsResponse, QueryFailure> {
        Self::parse_bytes(Bytes::copy_from_slice(response_bytes), expected)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
