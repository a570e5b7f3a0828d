use crate::utils::error::{DumpError, Result};
use encoding_rs::SHIFT_JIS;

pub const LINE_SEPARATOR: &[u8] = b"\r\n";

/// 將每一行轉為 Shift_JIS 後以 CRLF 連接（最後一行不加換行）
///
/// 無法表示的字元一律視為錯誤，不做替換。
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            output.extend_from_slice(LINE_SEPARATOR);
        }
        output.extend_from_slice(&encode_line(line.as_ref(), index + 1)?);
    }

    Ok(output)
}

fn encode_line(line: &str, line_number: usize) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(line);
    if !had_errors {
        return Ok(bytes.into_owned());
    }

    // encoding_rs 會把無法表示的字元換成數值字元參照，這裡找出第一個並回報
    let character = line
        .chars()
        .find(|c| {
            let mut buffer = [0u8; 4];
            let (_, _, unmappable) = SHIFT_JIS.encode(c.encode_utf8(&mut buffer));
            unmappable
        })
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    Err(DumpError::Encoding {
        character,
        line: line_number,
    })
}
