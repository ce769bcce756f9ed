#![allow(dead_code)]
use hickory_proto::op::Message;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// What the mock server does with a question.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one A record per address.
    Answer(Vec<[u8; 4]>),
    /// Empty answer with the given RCODE.
    Rcode(u8),
    /// UDP answer has TC set and no records; TCP gets the real answer.
    Truncated(Vec<[u8; 4]>),
    /// Never replies.
    Silent,
}

/// Scripted DNS server on 127.0.0.1, UDP and TCP on the same port.
///
/// Replies are chosen by question name; anything unscripted gets the default.
pub struct MockDnsServer {
    addr: SocketAddr,
    questions: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(default: MockReply) -> Result<Self, std::io::Error> {
        Self::start_with(default, HashMap::new()).await
    }

    pub async fn start_with(
        default: MockReply,
        by_name: HashMap<String, MockReply>,
    ) -> Result<Self, std::io::Error> {
        let udp = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;

        let questions = Arc::new(Mutex::new(Vec::new()));
        let script = Arc::new(Script { default, by_name });
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_questions = Arc::clone(&questions);
        let udp_script = Arc::clone(&script);
        let tcp_script = Arc::clone(&script);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let query = &buf[..len];
                        let name = question_name(query);
                        udp_questions.lock().unwrap().push(name.clone());

                        let response = match udp_script.reply_for(&name) {
                            MockReply::Answer(ips) => build_response(query, 0, false, ips),
                            MockReply::Rcode(rcode) => build_response(query, *rcode, false, &[]),
                            MockReply::Truncated(_) => build_response(query, 0, true, &[]),
                            MockReply::Silent => continue,
                        };
                        let _ = udp.send_to(&response, peer).await;
                    }
                    accepted = tcp.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let script = Arc::clone(&tcp_script);
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            let name = question_name(&query);
                            let response = match script.reply_for(&name) {
                                MockReply::Answer(ips) | MockReply::Truncated(ips) => {
                                    build_response(&query, 0, false, ips)
                                }
                                MockReply::Rcode(rcode) => build_response(&query, *rcode, false, &[]),
                                MockReply::Silent => return,
                            };
                            let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                            framed.extend_from_slice(&response);
                            let _ = stream.write_all(&framed).await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            questions,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Question names received over UDP, in arrival order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

struct Script {
    default: MockReply,
    by_name: HashMap<String, MockReply>,
}

impl Script {
    fn reply_for(&self, name: &str) -> &MockReply {
        self.by_name.get(name).unwrap_or(&self.default)
    }
}

fn question_name(query: &[u8]) -> String {
    Message::from_vec(query)
        .ok()
        .and_then(|m| m.queries().first().map(|q| q.name().to_utf8()))
        .unwrap_or_default()
}

/// Echoes the question and appends one A record per address.
fn build_response(query: &[u8], rcode: u8, truncated: bool, ips: &[[u8; 4]]) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]); // Transaction ID
    response.push(if truncated { 0x83 } else { 0x81 }); // QR=1, TC, RD=1
    response.push(0x80 | (rcode & 0x0f)); // RA=1, RCODE
    response.extend_from_slice(&query[4..6]); // Questions
    response.extend_from_slice(&(ips.len() as u16).to_be_bytes()); // Answers
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Authority, Additional

    response.extend_from_slice(&query[12..]);

    for ip in ips {
        response.extend_from_slice(&[
            0xc0, 0x0c, // Name pointer to question
            0x00, 0x01, // Type A
            0x00, 0x01, // Class IN
            0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
            0x00, 0x04, // Data length: 4 bytes
        ]);
        response.extend_from_slice(ip);
    }

    response
}
