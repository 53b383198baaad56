/// Minimal multipart/form-data parsing for tiny_http request bodies.
///
/// The whole body is parsed once into a [`MultipartForm`] holding the file
/// parts and text fields by name, which is all the upload handler needs.

/// One uploaded file part.  Data borrows from the request body.
pub struct FilePart<'a> {
    pub filename: Option<String>,
    pub data: &'a [u8],
}

pub struct MultipartForm<'a> {
    files: Vec<(String, FilePart<'a>)>,
    fields: Vec<(String, String)>,
}

impl<'a> MultipartForm<'a> {
    /// Parses a multipart body.  Malformed parts are skipped; the result may
    /// be empty but parsing itself never fails.
    pub fn parse(body: &'a [u8], boundary: &str) -> MultipartForm<'a> {
        let delimiter = format!("--{}", boundary);
        let mut files = Vec::new();
        let mut fields = Vec::new();

        for part in split_on(body, delimiter.as_bytes()) {
            let sep = b"\r\n\r\n";
            let Some(sep_pos) = find_subsequence(part, sep) else {
                continue;
            };
            let headers = String::from_utf8_lossy(&part[..sep_pos]);
            let Some(name) = disposition_attr(&headers, "name") else {
                continue;
            };

            let raw = &part[sep_pos + sep.len()..];
            let data = raw.strip_suffix(b"\r\n").unwrap_or(raw);

            if headers.contains("filename=") {
                let filename = disposition_attr(&headers, "filename");
                files.push((name, FilePart { filename, data }));
            } else if let Ok(value) = String::from_utf8(data.to_vec()) {
                fields.push((name, value));
            }
        }

        MultipartForm { files, fields }
    }

    /// The file part uploaded under the given field name.
    pub fn file(&self, name: &str) -> Option<&FilePart<'a>> {
        self.files.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// A text (non-file) field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
}

/// Parses a `key="value"` attribute out of a Content-Disposition header.
///
/// Matches on attribute boundaries so looking up `name` does not land inside
/// `filename`.
fn disposition_attr(headers: &str, key: &str) -> Option<String> {
    let marker = format!("{}=\"", key);
    let mut search = 0;
    while let Some(pos) = headers[search..].find(&marker) {
        let abs = search + pos;
        let mid_word = abs > 0 && headers.as_bytes()[abs - 1].is_ascii_alphanumeric();
        if !mid_word {
            let rest = &headers[abs + marker.len()..];
            let end = rest.find('"')?;
            return Some(rest[..end].to_owned());
        }
        search = abs + marker.len();
    }
    None
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, excluding the needle.
fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}
