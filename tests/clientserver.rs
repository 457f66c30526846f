use failure::Fail;
use hawk_sign::{Client, Credentials, Endpoint, Header, Key, RequestBuilder, SHA256};
use hawk_sign::{Envelope, ResponseContext, SignedRequest};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Request, Response, StatusCode};

#[derive(Clone, Debug)]
struct TestParams {
    client_send_hash: bool,
    server_require_hash: bool,
    server_send_hash: bool,
    client_require_hash: bool,
}

#[derive(Fail, Debug)]
pub enum TestError {
    #[fail(display = "Test failure: {}", _0)]
    Failure(String),

    #[fail(display = "{}", _0)]
    HawkError(hawk_sign::Error),

    #[fail(display = "{}", _0)]
    Http(#[fail(cause)] http::Error),

    #[fail(display = "{}", _0)]
    HttpToStr(#[fail(cause)] http::header::ToStrError),
}

impl From<hawk_sign::Error> for TestError {
    fn from(e: hawk_sign::Error) -> Self {
        TestError::HawkError(e)
    }
}

impl From<http::Error> for TestError {
    fn from(e: http::Error) -> Self {
        TestError::Http(e)
    }
}

impl From<http::header::ToStrError> for TestError {
    fn from(e: http::header::ToStrError) -> Self {
        TestError::HttpToStr(e)
    }
}

const REQUEST_BODY: &[u8] = b"foo=bar";
const RESPONSE_BODY: &[u8] = b"Hello, client";

fn credentials() -> Credentials {
    Credentials::new("test-client", "no-secret", SHA256)
}

/// Rebuild the envelope of an incoming request from its request-target and `Authorization`
/// header.  The target is used exactly as received.
fn server_envelope(req: &Request<Vec<u8>>) -> Result<Envelope, TestError> {
    let endpoint = Endpoint::parse(&req.uri().to_string())?;
    let host = req
        .uri()
        .host()
        .ok_or_else(|| TestError::Failure("no host".to_string()))?;
    let target = req
        .uri()
        .path_and_query()
        .ok_or_else(|| TestError::Failure("no request-target".to_string()))?;
    let auth: Header = req.headers()[AUTHORIZATION].to_str()?.parse()?;
    let ts = auth
        .ts
        .ok_or_else(|| TestError::Failure("no ts".to_string()))?;
    let nonce = auth
        .nonce
        .ok_or_else(|| TestError::Failure("no nonce".to_string()))?;
    Ok(RequestBuilder::new()
        .algorithm(SHA256)
        .method(req.method().as_str())
        .endpoint(&endpoint)
        .host(host)
        .uri(target.as_str())
        .ts(ts)
        .nonce(nonce)
        .build()?
        .into_envelope())
}

/// Authenticate a request and answer it, as a server sharing the client's key would.
fn serve(
    req: &Request<Vec<u8>>,
    params: &TestParams,
    key: &Key,
) -> Result<Response<Vec<u8>>, TestError> {
    let envelope = server_envelope(req)?;
    let auth = req.headers()[AUTHORIZATION].to_str()?;

    let mut ctx = ResponseContext::from_authorization(&envelope, auth)?.content(req.body());
    if params.server_require_hash {
        ctx = ctx.content_type("text/plain");
    }
    if !ctx.is_valid(key) {
        return Ok(Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(vec![])?);
    }

    let content_type = if params.server_send_hash {
        Some("text/plain")
    } else {
        None
    };
    let server_auth = envelope.server_authorization(key, content_type, RESPONSE_BODY, None)?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain")
        .header("Server-Authorization", server_auth)
        .body(RESPONSE_BODY.to_vec())?)
}

fn send(client: &Client, params: &TestParams) -> Result<SignedRequest, TestError> {
    send_to(client, params, "http://localhost:9988/resource?x=1")
}

fn send_to(client: &Client, params: &TestParams, url: &str) -> Result<SignedRequest, TestError> {
    let content_type = if params.client_send_hash {
        "text/plain"
    } else {
        ""
    };
    Ok(client.new_request(
        "POST",
        url,
        REQUEST_BODY,
        content_type,
        Some("client-ext"),
    )?)
}

fn run_client_server(params: TestParams) -> Result<(), TestError> {
    let credentials = credentials();
    let client = Client::new(credentials.clone());
    let (req, envelope) = send(&client, &params)?.into_parts();

    let resp = serve(&req, &params, &credentials.key)?;
    if resp.status() != StatusCode::OK {
        return Err(TestError::Failure(format!(
            "server rejected request: {}",
            resp.status()
        )));
    }

    let server_auth = resp.headers()["Server-Authorization"].to_str()?;
    let content_type = if params.client_require_hash {
        Some("text/plain")
    } else {
        None
    };
    client.verify_response(&envelope, server_auth, content_type, resp.body())?;
    Ok(())
}

fn all_params() -> Vec<TestParams> {
    let mut all = vec![];
    for bits in 0..16 {
        all.push(TestParams {
            client_send_hash: bits & 1 != 0,
            server_require_hash: bits & 2 != 0,
            server_send_hash: bits & 4 != 0,
            client_require_hash: bits & 8 != 0,
        });
    }
    all
}

#[test]
fn client_server_matrix() {
    for params in all_params() {
        let should_succeed = (params.client_send_hash || !params.server_require_hash)
            && (params.server_send_hash || !params.client_require_hash);
        let result = run_client_server(params.clone());
        assert_eq!(
            result.is_ok(),
            should_succeed,
            "{:?} gave {:?}",
            params,
            result
        );
    }
}

#[test]
fn server_rejects_tampered_body() {
    let credentials = credentials();
    let client = Client::new(credentials.clone());
    let params = TestParams {
        client_send_hash: true,
        server_require_hash: true,
        server_send_hash: true,
        client_require_hash: true,
    };
    let (req, _) = send(&client, &params).unwrap().into_parts();
    let (parts, _) = req.into_parts();
    let tampered = Request::from_parts(parts, b"foo=baz".to_vec());
    let resp = serve(&tampered, &params, &credentials.key).unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn server_rejects_wrong_key() {
    let client = Client::new(credentials());
    let params = TestParams {
        client_send_hash: false,
        server_require_hash: false,
        server_send_hash: false,
        client_require_hash: false,
    };
    let (req, _) = send(&client, &params).unwrap().into_parts();
    let resp = serve(&req, &params, &Key::new("other-secret", SHA256)).unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn client_rejects_tampered_response() {
    let credentials = credentials();
    let client = Client::new(credentials.clone());
    let params = TestParams {
        client_send_hash: true,
        server_require_hash: true,
        server_send_hash: true,
        client_require_hash: true,
    };
    let (req, envelope) = send(&client, &params).unwrap().into_parts();
    let resp = serve(&req, &params, &credentials.key).unwrap();
    let server_auth = resp.headers()["Server-Authorization"].to_str().unwrap();
    assert!(client
        .verify_response(&envelope, server_auth, Some("text/plain"), b"Hello, clienT")
        .is_err());
}

#[test]
fn response_for_other_request_rejected() {
    let credentials = credentials();
    let client = Client::new(credentials.clone());
    let params = TestParams {
        client_send_hash: false,
        server_require_hash: false,
        server_send_hash: false,
        client_require_hash: false,
    };
    let (req1, envelope1) = send(&client, &params).unwrap().into_parts();
    let (_, envelope2) = send(&client, &params).unwrap().into_parts();
    let resp = serve(&req1, &params, &credentials.key).unwrap();
    let server_auth = resp.headers()["Server-Authorization"].to_str().unwrap();

    client
        .verify_response(&envelope1, server_auth, None, resp.body())
        .unwrap();
    // a different nonce means a different MAC
    assert!(client
        .verify_response(&envelope2, server_auth, None, resp.body())
        .is_err());
}

#[test]
fn server_accepts_unnormalized_target() {
    let credentials = credentials();
    let client = Client::new(credentials.clone());
    let params = TestParams {
        client_send_hash: true,
        server_require_hash: true,
        server_send_hash: false,
        client_require_hash: false,
    };
    let (req, _) = send_to(&client, &params, "http://localhost:9988/a/../b%7e?q=1")
        .unwrap()
        .into_parts();
    assert_eq!(req.uri().path_and_query().unwrap().as_str(), "/a/../b%7e?q=1");
    let resp = serve(&req, &params, &credentials.key).unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
