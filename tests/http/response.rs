use iotreq::network::application::http::{Client, Error, MAX_BODY_LEN};
use iotreq::network::error::Error as NetworkError;
use serde::Deserialize;

use crate::mock::{MockNetwork, Reply};

#[derive(Debug, Deserialize, PartialEq)]
struct Counter {
    a: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Status<'a> {
    state: &'a str,
    uptime: u32,
}

#[test]
fn status_and_reason() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n",
    )]));

    let response = client.get("http://h/missing").unwrap();
    assert_eq!(response.status_code, 404);
    assert_eq!(response.reason.as_str(), "Not Found");
    assert_eq!(response.headers.get("Content-Length"), Some("0"));
}

#[test]
fn text_body() {
    let network = MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nhello",
    )]);
    let wire = network.wire();
    let mut client = Client::new(network);

    let mut response = client.get("http://h/").unwrap();
    assert!(!wire.borrow().closed[0]);
    assert_eq!(response.text(), Ok("hello"));
    assert!(wire.borrow().closed[0]);
}

#[test]
fn body_is_read_once_and_cached() {
    let network = MockNetwork::new([Reply::Bytes(b"HTTP/1.0 200 OK\r\n\r\nsome longer body text")]);
    let wire = network.wire();
    let mut client = Client::new(network);

    let mut response = client.get("http://h/").unwrap();
    let first = response.content().unwrap().to_vec();
    let reads = wire.borrow().reads[0];

    assert_eq!(response.content().unwrap(), &first[..]);
    assert_eq!(response.text(), Ok("some longer body text"));
    assert_eq!(wire.borrow().reads[0], reads);
}

#[test]
fn body_spanning_many_reads() {
    let network = MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\nServer: tiny\r\n\r\n0123456789abcdefghijklmnopqrstuvwxyz",
    )])
    .with_piece(3);
    let mut client = Client::new(network);

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(
        response.text(),
        Ok("0123456789abcdefghijklmnopqrstuvwxyz")
    );
}

#[test]
fn empty_body() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 204 No Content\r\n\r\n",
    )]));

    let mut response = client.delete("http://h/item").unwrap();
    assert_eq!(response.content(), Ok(&b""[..]));
}

#[test]
fn headers_ended_by_bare_newline() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\nServer: lax\n\nbody",
    )]));

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(response.reason.as_str(), "OK");
    assert_eq!(response.headers.get("Server"), Some("lax"));
    assert_eq!(response.text(), Ok("body"));
}

#[test]
fn stream_ending_inside_headers() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\nServer: cut",
    )]));

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(response.headers.get("Server"), Some("cut"));
    assert_eq!(response.content(), Ok(&b""[..]));
}

#[test]
fn close_discards_body() {
    let network = MockNetwork::new([Reply::Bytes(b"HTTP/1.0 200 OK\r\n\r\nunread")]);
    let wire = network.wire();
    let mut client = Client::new(network);

    let mut response = client.get("http://h/").unwrap();
    response.close().unwrap();
    assert!(wire.borrow().closed[0]);

    assert_eq!(response.content(), Err(Error::Closed));
    assert_eq!(response.text(), Err(Error::Closed));
    assert_eq!(response.close(), Ok(()));
}

#[test]
fn close_after_read_clears_cache() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\n\r\ncached",
    )]));

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(response.text(), Ok("cached"));
    response.close().unwrap();
    assert_eq!(response.text(), Err(Error::Closed));
}

#[test]
fn dropping_unread_response_closes() {
    let network = MockNetwork::new([Reply::Bytes(b"HTTP/1.0 200 OK\r\n\r\nunread")]);
    let wire = network.wire();
    let mut client = Client::new(network);

    drop(client.get("http://h/").unwrap());
    assert!(wire.borrow().closed[0]);
}

#[test]
fn json_body() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\nContent-Type: application/json\r\n\r\n{\"a\":1}",
    )]));

    let mut response = client.get("http://h/counter").unwrap();
    let counter: Counter = response.json().unwrap();
    assert_eq!(counter, Counter { a: 1 });
}

#[test]
fn json_borrows_from_body() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\n\r\n{\"state\":\"idle\",\"uptime\":3600}",
    )]));

    let mut response = client.get("http://h/status").unwrap();
    let status: Status = response.json().unwrap();
    assert_eq!(
        status,
        Status {
            state: "idle",
            uptime: 3600
        }
    );
}

#[test]
fn json_decode_failure() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\n\r\n<html>not json</html>",
    )]));

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(response.json::<Counter>(), Err(Error::Decode));
}

#[test]
fn text_decode_failure() {
    let mut client = Client::new(MockNetwork::new([Reply::Bytes(
        b"HTTP/1.0 200 OK\r\n\r\n\xff\xfe",
    )]));

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(response.text(), Err(Error::Decode));
    assert_eq!(response.content(), Ok(&b"\xff\xfe"[..]));
}

#[test]
fn body_read_failure_closes() {
    let network = MockNetwork::new([Reply::BrokenRead(b"HTTP/1.0 200 OK\r\n\r\npartial")]);
    let wire = network.wire();
    let mut client = Client::new(network);

    let mut response = client.get("http://h/").unwrap();
    assert_eq!(
        response.content(),
        Err(Error::Network(NetworkError::ReadError))
    );
    assert!(wire.borrow().closed[0]);
    assert_eq!(response.content(), Err(Error::Closed));
}

#[test]
fn oversized_body_overflows() {
    let mut data = b"HTTP/1.0 200 OK\r\n\r\n".to_vec();
    data.resize(data.len() + MAX_BODY_LEN + 1, b'x');
    let data: &'static [u8] = Box::leak(data.into_boxed_slice());

    let network = MockNetwork::new([Reply::Bytes(data)]).with_piece(512);
    let wire = network.wire();
    let mut client = Client::new(network);

    let mut response = client.get("http://h/big").unwrap();
    assert_eq!(response.content(), Err(Error::Overflow));
    assert!(wire.borrow().closed[0]);
}
