use crate::AppState;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{Method, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode;

pub const BODY_FIELD: &str = "body";

/// The `body` field of a save request, as raw bytes.
///
/// A posted form (urlencoded or multipart) wins over the query string. A request with neither,
/// or with a body of some other content type, yields an empty body. Values are percent-decoded
/// without any UTF-8 step, so whatever bytes the client sent are the bytes that get stored.
#[derive(Debug)]
pub struct PageBody(pub Vec<u8>);

impl FromRequest<AppState> for PageBody {
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let from_query = req
            .uri()
            .query()
            .and_then(|query| form_field(query.as_bytes(), BODY_FIELD));

        let reads_body = [Method::POST, Method::PUT, Method::PATCH].contains(req.method());
        let posted = match content_type(&req) {
            Some(ContentType::Multipart) if reads_body => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                multipart_field(multipart, BODY_FIELD).await?
            }
            Some(ContentType::UrlEncoded) if reads_body => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                form_field(&bytes, BODY_FIELD)
            }
            _ => None,
        };

        Ok(PageBody(posted.or(from_query).unwrap_or_default()))
    }
}

enum ContentType {
    UrlEncoded,
    Multipart,
}

fn content_type(req: &Request) -> Option<ContentType> {
    let value = req.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next()?.trim().to_ascii_lowercase();

    match essence.as_str() {
        "application/x-www-form-urlencoded" => Some(ContentType::UrlEncoded),
        "multipart/form-data" => Some(ContentType::Multipart),
        _ => None,
    }
}

async fn multipart_field(mut multipart: Multipart, name: &str) -> Result<Option<Vec<u8>>, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        if field.name() == Some(name) {
            let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
            return Ok(Some(bytes.to_vec()));
        }
    }

    Ok(None)
}

/// First value of `name` in an `application/x-www-form-urlencoded` payload, decoded to bytes.
pub fn form_field(input: &[u8], name: &str) -> Option<Vec<u8>> {
    input
        .split(|b| *b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|b| *b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_component(key) == name.as_bytes()).then(|| decode_component(value))
        })
}

// '+' is a space in form encoding, then %XX escapes
fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|b| if *b == b'+' { b' ' } else { *b })
        .collect();
    percent_decode(&spaced).collect()
}
