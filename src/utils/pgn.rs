//! PGN read/write utilities for game history interchange.
//!
//! Serializes a `Game` to PGN text with Seven-Tag-Roster headers and SAN
//! movetext, and parses PGN back into a `Game` by replaying the movetext.

use std::collections::BTreeMap;

use chrono::Local;

use crate::errors::{ChessError, ChessResult};
use crate::game::chess_game::Game;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: Game,
    pub result: String,
}

/// PGN for `game` with default headers, today's date, and `result`
/// (anything other than a PGN result token is written as `*`).
pub fn write_pgn(game: &Game, result: &str) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    write_pgn_with_headers(game, &headers)
}

/// PGN for `game` with exactly `headers`, plus `SetUp` / `FEN` when the
/// game did not start from the standard position.
pub fn write_pgn_with_headers(game: &Game, headers: &BTreeMap<String, String>) -> String {
    let mut headers = headers.clone();
    let initial_fen = game.initial_state().get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let initial = game.initial_state();
    let mut move_number = initial.fullmove_number;
    let mut to_move = initial.side_to_move;
    let mut movetext_parts = Vec::<String>::new();
    for (ply, san) in game.san_history().into_iter().enumerate() {
        match to_move {
            Color::White => movetext_parts.push(format!("{move_number}. {san}")),
            Color::Black if ply == 0 => movetext_parts.push(format!("{move_number}... {san}")),
            Color::Black => movetext_parts.push(san),
        }
        if to_move == Color::Black {
            move_number += 1;
        }
        to_move = to_move.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parse PGN text and replay its main line.
///
/// Comments, variations, NAGs, move numbers and annotation marks are
/// ignored. The `Result` header wins over a result token in the movetext.
pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut game = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::notation("PGN SetUp=1 is present but FEN header is missing")
        })?;
        Game::from_fen(fen)?
    } else {
        Game::new()
    };

    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) || token.starts_with('$') {
            continue;
        }

        let cleaned = trim_annotation_suffix(strip_move_number_prefix(token));
        if cleaned.is_empty() {
            continue;
        }
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        game.play_san(cleaned)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(ChessError::notation(format!("invalid PGN header line: {line}")));
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts
        .next()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ChessError::notation(format!("invalid PGN header key: {line}")))?
        .trim();
    let value_raw = parts
        .next()
        .ok_or_else(|| ChessError::notation(format!("invalid PGN header value: {line}")))?
        .trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(ChessError::notation(format!(
            "invalid quoted PGN header value: {line}"
        )));
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            // Keep tokens on either side of a comment apart.
            '}' => {
                brace_depth = brace_depth.saturating_sub(1);
                out.push(' ');
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(' ');
            }
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `12.Nf3` and `12...Nf6` carry the move number glued to the move.
fn strip_move_number_prefix(token: &str) -> &str {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if digits_end == 0 || !token[digits_end..].starts_with('.') {
        return token;
    }
    token[digits_end..].trim_start_matches('.')
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pgn_round_trip_start_position_history() {
        let game = Game::replay(None, &["e4", "e5", "Nf3", "Nc6"]).expect("replay");

        let pgn = write_pgn(&game, "*");
        assert!(pgn.contains("1. e4 e5 2. Nf3 Nc6 *"));
        assert!(!pgn.contains("[FEN"));
        let parsed = read_pgn(&pgn).expect("PGN should parse");

        assert_eq!(parsed.game.moves(), game.moves());
        assert_eq!(parsed.game.fen(), game.fen());
        assert_eq!(parsed.result, "*");
        assert_eq!(parsed.headers.get("Round").map(String::as_str), Some("-"));
    }

    #[test]
    fn pgn_round_trip_custom_fen_setup() {
        let game = Game::replay(Some("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1"), &["Kd7", "e4"])
            .expect("replay");

        let mut headers = BTreeMap::<String, String>::new();
        headers.insert("Event".to_owned(), "Custom \"quoted\"".to_owned());
        headers.insert("Result".to_owned(), "1-0".to_owned());

        let pgn = write_pgn_with_headers(&game, &headers);
        assert!(pgn.contains("1... Kd7 2. e4 1-0"));
        let parsed = read_pgn(&pgn).expect("PGN should parse");

        assert_eq!(parsed.game.initial_state(), game.initial_state());
        assert_eq!(parsed.game.moves(), game.moves());
        assert_eq!(parsed.result, "1-0");
        assert_eq!(
            parsed.headers.get("Event").map(String::as_str),
            Some("Custom \"quoted\"")
        );
    }

    #[test]
    fn movetext_noise_is_ignored() {
        let pgn = "[Event \"x\"]\n\n1.e4 {best by test} e5 (1...c5 2.Nf3) 2.Nf3!? $1 Nc6 3...a6?? 0-1";
        let parsed = read_pgn(pgn);
        // 3...a6 is black's move in a position where white is to move.
        assert!(matches!(parsed, Err(ChessError::IllegalMove(_))));

        let pgn = "1.e4 {best by test} e5 (1...c5 2.Nf3) 2.Nf3!? $1 Nc6 3.Bb5 a6 0-1";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.game.san_history(), vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(parsed.result, "0-1");
    }

    #[test]
    fn pawn_capture_without_origin_file_is_rejected() {
        // After 1. d4 e5, only dxe5 reaches e5.
        assert!(matches!(
            read_pgn("1. d4 e5 2. e5 *"),
            Err(ChessError::IllegalMove(_))
        ));
        let parsed = read_pgn("1. d4 e5 2. dxe5 *").expect("PGN should parse");
        assert_eq!(parsed.game.san_history(), vec!["d4", "e5", "dxe5"]);
    }

    #[test]
    fn header_errors_are_invalid_notation() {
        assert!(matches!(
            read_pgn("[Event unquoted]\n1. e4 *"),
            Err(ChessError::InvalidNotation(_))
        ));
        assert!(matches!(
            read_pgn("[SetUp \"1\"]\n1. e4 *"),
            Err(ChessError::InvalidNotation(_))
        ));
    }
}
