//! IDX binary parsing for MNIST and its derivatives (Fashion-MNIST, EMNIST, …).
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   0x00000803  (magic: uint8 dtype, 3 dimensions, big-endian)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   0x00000801  (magic: uint8 dtype, 1 dimension, big-endian)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index in [0, n_classes)
//! ```

const IMAGE_MAGIC: u32 = 0x0000_0803;
const LABEL_MAGIC: u32 = 0x0000_0801;

/// A parsed image/label pair ready for training.
///
/// - `inputs[i]`  is a `Vec<f64>` of length `rows * cols`, each pixel divided
///   by 255.0 so values lie in `[0.0, 1.0]`.
/// - `targets[i]` is a one-hot `Vec<f64>` of length `n_classes`.
#[derive(Debug, Clone)]
pub struct IdxPair {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
    pub rows: usize,
    pub cols: usize,
}

fn read_be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Parses a pair of IDX buffers (image + label) into normalized inputs and
/// one-hot targets, validating every header field against the data length.
pub fn parse_idx_pair(
    image_bytes: &[u8],
    label_bytes: &[u8],
    n_classes: usize,
) -> Result<IdxPair, String> {
    if n_classes < 2 {
        return Err(format!("n_classes must be at least 2, got {}.", n_classes));
    }

    // ── Image file validation ───────────────────────────────────────────────

    if image_bytes.len() < 16 {
        return Err(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}.",
            image_bytes.len()
        ));
    }

    let image_magic = read_be_u32(image_bytes, 0);
    if image_magic != IMAGE_MAGIC {
        return Err(format!(
            "IDX image file magic number mismatch: expected {:#010x}, got {:#010x}. \
             This does not appear to be an IDX3 image file.",
            IMAGE_MAGIC, image_magic
        ));
    }

    let n_items = read_be_u32(image_bytes, 4) as usize;
    let rows = read_be_u32(image_bytes, 8) as usize;
    let cols = read_be_u32(image_bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        format!("IDX image file: rows * cols overflows usize (rows={}, cols={}).", rows, cols)
    })?;
    if n_pixels == 0 {
        return Err(format!(
            "IDX image file: image dimensions must be non-zero, got {}×{}.",
            rows, cols
        ));
    }
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        format!(
            "IDX image file: n_items * n_pixels overflows usize (n_items={}, n_pixels={}).",
            n_items, n_pixels
        )
    })?;

    if image_bytes.len() < 16 + data_len {
        return Err(format!(
            "IDX image file too short: header declares {} items of {}×{} pixels \
             ({} data bytes needed after header), but file is only {} bytes total.",
            n_items, rows, cols, data_len, image_bytes.len()
        ));
    }

    // ── Label file validation ───────────────────────────────────────────────

    if label_bytes.len() < 8 {
        return Err(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}.",
            label_bytes.len()
        ));
    }

    let label_magic = read_be_u32(label_bytes, 0);
    if label_magic != LABEL_MAGIC {
        return Err(format!(
            "IDX label file magic number mismatch: expected {:#010x}, got {:#010x}. \
             This does not appear to be an IDX1 label file.",
            LABEL_MAGIC, label_magic
        ));
    }

    let label_count = read_be_u32(label_bytes, 4) as usize;
    if label_count != n_items {
        return Err(format!(
            "IDX file mismatch: image file declares {} items but label file declares {}.",
            n_items, label_count
        ));
    }

    if label_bytes.len() < 8 + n_items {
        return Err(format!(
            "IDX label file too short: header declares {} labels but file is only {} bytes \
             (need at least {} bytes).",
            n_items, label_bytes.len(), 8 + n_items
        ));
    }

    // ── Build inputs ────────────────────────────────────────────────────────

    let image_data = &image_bytes[16..16 + data_len];
    let inputs: Vec<Vec<f64>> = image_data
        .chunks_exact(n_pixels)
        .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
        .collect();

    // ── Build targets (one-hot) ─────────────────────────────────────────────

    let label_data = &label_bytes[8..8 + n_items];
    let mut targets: Vec<Vec<f64>> = Vec::with_capacity(n_items);
    for (i, &class_idx) in label_data.iter().enumerate() {
        let class = class_idx as usize;
        if class >= n_classes {
            return Err(format!(
                "IDX label at index {}: class index {} is out of range for n_classes={}.",
                i, class, n_classes
            ));
        }
        let mut one_hot = vec![0.0f64; n_classes];
        one_hot[class] = 1.0;
        targets.push(one_hot);
    }

    Ok(IdxPair { inputs, targets, rows, cols })
}

/// Reads and parses an IDX image/label file pair from disk.
pub fn read_idx_pair(
    image_path: &str,
    label_path: &str,
    n_classes: usize,
) -> Result<IdxPair, String> {
    let image_bytes = std::fs::read(image_path)
        .map_err(|e| format!("Cannot read image file '{}': {}", image_path, e))?;
    let label_bytes = std::fs::read(label_path)
        .map_err(|e| format!("Cannot read label file '{}': {}", label_path, e))?;
    parse_idx_pair(&image_bytes, &label_bytes, n_classes)
}
