//! End-to-end queries against a running server over loopback UDP

use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;

use zonedns::dns_header::DnsHeader;
use zonedns::dns_message::DnsMessage;
use zonedns::dns_question_and_answer::DnsQuestion;
use zonedns::dns_types::{RecordClass, RecordType, RCODE_NOERROR, RCODE_NXDOMAIN};
use zonedns::server::{DnsServer, ServerHandle};
use zonedns::zone::RecordStore;

const ZONE: &str = "\
; test zone
example.com 3600 IN A 93.184.216.34
nsonly.example.com IN NS ns1.example.com
";

fn start() -> ServerHandle {
    let store = Arc::new(RecordStore::parse(ZONE));
    DnsServer::bind("127.0.0.1:0", store)
        .unwrap()
        .start()
        .unwrap()
}

fn ask(handle: &ServerHandle, id: u16, questions: &[DnsQuestion]) -> DnsMessage {
    let header = DnsHeader {
        id,
        flags: 0x0100,
        question_count: questions.len() as u16,
        ..Default::default()
    };
    let mut packet = header.to_bytes().to_vec();
    for question in questions {
        packet.extend(question.to_bytes().unwrap());
    }

    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    client.send_to(&packet, handle.local_addr()).unwrap();

    let mut buf = [0u8; 1024];
    let (size, _) = client.recv_from(&mut buf).unwrap();
    DnsMessage::decode_with_answers(&buf[..size]).unwrap()
}

#[test]
fn a_record_is_answered() {
    let mut handle = start();
    let question = DnsQuestion::new("example.com", RecordType::A, RecordClass::IN);
    let response = ask(&handle, 0x1234, &[question.clone()]);

    assert_eq!(response.header.id, 0x1234);
    assert_eq!(response.flags().rcode, RCODE_NOERROR);
    assert_eq!(response.questions, vec![question]);
    assert_eq!(response.answers.len(), 1);
    assert_eq!(response.answers[0].ttl, 3600);
    assert_eq!(response.answers[0].rdata, vec![93, 184, 216, 34]);

    handle.stop();
}

#[test]
fn missing_name_is_nxdomain() {
    let mut handle = start();
    let response = ask(
        &handle,
        7,
        &[DnsQuestion::new("missing.test", RecordType::A, RecordClass::IN)],
    );

    assert_eq!(response.header.answer_count, 0);
    assert_eq!(response.flags().rcode, RCODE_NXDOMAIN);

    handle.stop();
}

#[test]
fn name_without_a_record_is_nxdomain() {
    let mut handle = start();
    let response = ask(
        &handle,
        8,
        &[DnsQuestion::new("nsonly.example.com", RecordType::A, RecordClass::IN)],
    );

    assert_eq!(response.header.question_count, 1);
    assert_eq!(response.header.answer_count, 0);
    assert_eq!(response.flags().rcode, RCODE_NXDOMAIN);

    handle.stop();
}

#[test]
fn requests_are_served_in_sequence() {
    let mut handle = start();
    for id in 0..5u16 {
        let response = ask(
            &handle,
            id,
            &[DnsQuestion::new("example.com", RecordType::A, RecordClass::IN)],
        );
        assert_eq!(response.header.id, id);
        assert_eq!(response.answers.len(), 1);
    }
    handle.stop();
}
