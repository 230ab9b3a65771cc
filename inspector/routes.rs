use std::io::Cursor;

use rand::Rng;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use primer_nn::data::image::encode_grayscale_png;

use crate::render;
use crate::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn png_response(bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"image/png").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            Header::from_bytes(b"Location", location.as_bytes()).unwrap(),
            Header::from_bytes(b"Content-Length", b"0").unwrap(),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests. Paths:
/// - `/`                      → redirect to sample 0
/// - `/random`                → redirect to a random sample
/// - `/sample/{i}`            → prediction page for sample i
/// - `/sample/{i}/image.png`  → the sample rendered as a PNG
pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let path = request.url().to_owned();

    if method != Method::Get {
        let _ = request.respond(not_found());
        return;
    }

    let response = match path.as_str() {
        "/" => redirect("/sample/0"),
        "/random" => {
            let len = state.lock().unwrap().dataset.len();
            if len == 0 {
                not_found()
            } else {
                let idx = rand::thread_rng().gen_range(0..len);
                redirect(&format!("/sample/{}", idx))
            }
        }
        _ => match parse_sample_path(&path) {
            Some((index, wants_image)) => serve_sample(index, wants_image, &state),
            None => not_found(),
        },
    };

    let _ = request.respond(response);
}

/// Splits `/sample/{i}` and `/sample/{i}/image.png` into (index, wants_image).
fn parse_sample_path(path: &str) -> Option<(usize, bool)> {
    let rest = path.strip_prefix("/sample/")?;
    if let Some(idx) = rest.strip_suffix("/image.png") {
        return Some((idx.parse().ok()?, true));
    }
    Some((rest.parse().ok()?, false))
}

fn serve_sample(
    index: usize,
    wants_image: bool,
    state: &SharedState,
) -> Response<Cursor<Vec<u8>>> {
    let mut state = state.lock().unwrap();
    if index >= state.dataset.len() {
        return not_found();
    }

    if wants_image {
        let pixels = &state.dataset.inputs[index];
        let (w, h) = (state.dataset.image_width as u32, state.dataset.image_height as u32);
        return match encode_grayscale_png(pixels, w, h) {
            Ok(bytes) => png_response(bytes),
            Err(_) => not_found(),
        };
    }

    let input = state.dataset.inputs[index].clone();
    let prediction = state.model.predict(&input);
    let truth = state.dataset.class_of(index);
    html_response(render::sample_page(&state, index, truth, &prediction))
}
