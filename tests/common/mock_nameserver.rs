//! Scripted UDP nameservers for end-to-end flows.
//!
//! Each server binds a real loopback socket and answers per-name from a
//! behavior table, so a whole resolution can run over the genuine
//! transport without leaving the machine.

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use rootwalk_infrastructure::dns::message::MessageBuilder;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the server treats a question for a given name.
pub enum Behavior {
    /// A records for the queried name.
    Answer { addresses: Vec<Ipv4Addr>, ttl: u32 },
    /// A lone CNAME pointing at `target`.
    Alias { target: String },
    /// The CNAME hop inlined ahead of the target's A records, as a
    /// full-service upstream would return it.
    Chain {
        target: String,
        addresses: Vec<Ipv4Addr>,
        ttl: u32,
    },
    NxDomain,
    ServFail,
    /// Swallow the datagram and never reply.
    Silent,
}

pub struct MockNameServerBuilder {
    behaviors: HashMap<String, Behavior>,
    fallback: Behavior,
}

impl MockNameServerBuilder {
    pub fn behavior(mut self, name: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(name.to_ascii_lowercase(), behavior);
        self
    }

    pub fn answer(self, name: &str, addresses: &[Ipv4Addr], ttl: u32) -> Self {
        self.behavior(
            name,
            Behavior::Answer {
                addresses: addresses.to_vec(),
                ttl,
            },
        )
    }

    pub fn fallback(mut self, behavior: Behavior) -> Self {
        self.fallback = behavior;
        self
    }

    pub async fn start(self) -> MockNameServer {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("bind loopback socket");
        let addr = socket.local_addr().expect("local addr");
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(serve(
            socket,
            self.behaviors,
            self.fallback,
            Arc::clone(&queries),
            shutdown_rx,
        ));

        MockNameServer {
            addr,
            queries,
            shutdown: Some(shutdown_tx),
        }
    }
}

pub struct MockNameServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockNameServer {
    pub fn builder() -> MockNameServerBuilder {
        MockNameServerBuilder {
            behaviors: HashMap::new(),
            fallback: Behavior::ServFail,
        }
    }

    pub fn addr(&self) -> String {
        self.addr.to_string()
    }

    /// Datagrams received so far, replied to or not.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockNameServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve(
    socket: UdpSocket,
    behaviors: HashMap<String, Behavior>,
    fallback: Behavior,
    queries: Arc<AtomicUsize>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut buf = vec![0u8; 512];
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            received = socket.recv_from(&mut buf) => {
                let Ok((len, peer)) = received else { break };
                queries.fetch_add(1, Ordering::SeqCst);

                let Ok(request) = Message::from_vec(&buf[..len]) else { continue };
                let Some(question) = request.queries().first().cloned() else { continue };
                let qname = normalize(question.name());

                let behavior = behaviors.get(&qname).unwrap_or(&fallback);
                if matches!(behavior, Behavior::Silent) {
                    continue;
                }

                let reply = build_reply(request.id(), question, &qname, behavior);
                if let Ok(bytes) = MessageBuilder::serialize(&reply) {
                    let _ = socket.send_to(&bytes, peer).await;
                }
            }
        }
    }
}

fn build_reply(id: u16, question: Query, qname: &str, behavior: &Behavior) -> Message {
    let mut message = Message::new(id, MessageType::Response, OpCode::Query);
    message.add_query(question);

    match behavior {
        Behavior::Answer { addresses, ttl } => {
            for &addr in addresses {
                message.add_answer(Record::from_rdata(name(qname), *ttl, RData::A(A(addr))));
            }
        }
        Behavior::Alias { target } => {
            message.add_answer(Record::from_rdata(
                name(qname),
                300,
                RData::CNAME(CNAME(name(target))),
            ));
        }
        Behavior::Chain {
            target,
            addresses,
            ttl,
        } => {
            message.add_answer(Record::from_rdata(
                name(qname),
                *ttl,
                RData::CNAME(CNAME(name(target))),
            ));
            for &addr in addresses {
                message.add_answer(Record::from_rdata(name(target), *ttl, RData::A(A(addr))));
            }
        }
        Behavior::NxDomain => {
            message.set_response_code(ResponseCode::NXDomain);
        }
        Behavior::ServFail => {
            message.set_response_code(ResponseCode::ServFail);
        }
        Behavior::Silent => unreachable!("silent behavior never builds a reply"),
    }

    message
}

fn name(s: &str) -> Name {
    Name::from_str(s).expect("valid name in behavior table")
}

fn normalize(name: &Name) -> String {
    let mut s = name.to_utf8().to_ascii_lowercase();
    if s.len() > 1 && s.ends_with('.') {
        s.pop();
    }
    s
}
