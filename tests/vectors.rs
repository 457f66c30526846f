use hawk_sign::{
    Header, Key, PayloadHasher, RequestBuilder, ResponseContext, State, SHA256,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, UNIX_EPOCH};

const KEY: &str = "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn";

fn example_request() -> RequestBuilder {
    RequestBuilder::new()
        .algorithm(SHA256)
        .method("GET")
        .host("example.com")
        .port(8000)
        .uri("/resource/1?b=1&a=2")
        .ts(UNIX_EPOCH + Duration::new(1353832234, 0))
        .nonce("j4h3g2")
        .ext("some-app-ext-data")
}

#[test]
fn get_without_payload() {
    let key = Key::new(KEY, SHA256);
    let mut req = example_request().build().unwrap();
    req.finalize(&key).unwrap();
    assert_eq!(
        req.authorization("dh37fgj492je").unwrap(),
        "Hawk id=\"dh37fgj492je\", ts=\"1353832234\", nonce=\"j4h3g2\", \
         ext=\"some-app-ext-data\", mac=\"6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE=\""
    );
}

#[test]
fn post_with_payload() {
    let key = Key::new(KEY, SHA256);
    let mut req = example_request()
        .method("POST")
        .content_type("text/plain")
        .content("Thank you for flying Hawk")
        .build()
        .unwrap();
    req.validate().unwrap();
    req.finalize(&key).unwrap();

    let header: Header = req.authorization("dh37fgj492je").unwrap().parse().unwrap();
    assert_eq!(header.id.as_deref(), Some("dh37fgj492je"));
    assert_eq!(
        header.mac.unwrap().to_string(),
        "aSe1DERmZuRl3pI36/9BdZmnErTw3sNzOOAUlfeKjVw="
    );
    assert_eq!(
        header.hash.unwrap(),
        PayloadHasher::hash("text/plain", SHA256, "Thank you for flying Hawk")
    );
    assert_eq!(req.state(), State::HeaderEmitted);
}

#[test]
fn streaming_payload_hash() {
    let mut hasher = PayloadHasher::new("text/plain", SHA256);
    hasher.update("Thank you ");
    hasher.update("for flying Hawk");
    assert_eq!(
        hasher.finish(),
        PayloadHasher::hash("text/plain", SHA256, "Thank you for flying Hawk")
    );
}

#[test]
fn server_verifies_known_header() {
    let key = Key::new(KEY, SHA256);
    let envelope = example_request()
        .method("POST")
        .build()
        .unwrap()
        .into_envelope();
    let header = "Hawk id=\"dh37fgj492je\", ts=\"1353832234\", nonce=\"j4h3g2\", \
                  hash=\"Yi9LfIIFRtBEPt74PVmbTF/xVAwPn7ub15ePICfgnuY=\", \
                  ext=\"some-app-ext-data\", mac=\"aSe1DERmZuRl3pI36/9BdZmnErTw3sNzOOAUlfeKjVw=\"";

    let ctx = ResponseContext::from_authorization(&envelope, header)
        .unwrap()
        .content_type("text/plain")
        .content(b"Thank you for flying Hawk");
    ctx.verify(&key).unwrap();
    assert_eq!(ctx.ext(), Some("some-app-ext-data"));

    let ctx = ResponseContext::from_authorization(&envelope, header)
        .unwrap()
        .content_type("text/plain")
        .content(b"Thank you for flying Hawk!");
    assert!(!ctx.is_valid(&key));
}
