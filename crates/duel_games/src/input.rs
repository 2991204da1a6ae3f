//! Keyboard input to player intents.
//!
//! Local play reads crossterm key events. Remote players send raw terminal
//! bytes over a telnet-style connection, which [`InputDecoder`] turns into
//! the same intents.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duel_tictactoe::Direction;

/// Something a player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the local cursor one cell.
    MoveCursor(Direction),
    /// Put a mark under the cursor.
    PlaceMark,
    /// Start a new game.
    Restart,
    /// Leave.
    Quit,
}

impl Intent {
    /// Maps a crossterm key press. Arrows and `h`/`j`/`k`/`l` move, Enter
    /// and space place, `r` restarts, `q` and Ctrl-C quit.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Intent::Quit)
            }
            KeyCode::Up => Some(Intent::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Intent::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Intent::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Intent::MoveCursor(Direction::Right)),
            KeyCode::Enter => Some(Intent::PlaceMark),
            KeyCode::Char(c) => Self::from_char(c),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'q' => Some(Intent::Quit),
            'r' => Some(Intent::Restart),
            ' ' => Some(Intent::PlaceMark),
            'k' => Some(Intent::MoveCursor(Direction::Up)),
            'j' => Some(Intent::MoveCursor(Direction::Down)),
            'h' => Some(Intent::MoveCursor(Direction::Left)),
            'l' => Some(Intent::MoveCursor(Direction::Right)),
            _ => None,
        }
    }
}

/// Telnet "interpret as command" prefix.
pub const IAC: u8 = 255;
const SE: u8 = 240;
const SB: u8 = 250;
const WILL: u8 = 251;
const DONT: u8 = 254;
/// Telnet ECHO option.
pub const OPT_ECHO: u8 = 1;
/// Telnet SUPPRESS-GO-AHEAD option.
pub const OPT_SUPPRESS_GO_AHEAD: u8 = 3;

/// Sent on connect so telnet clients stop echoing and send each key press
/// immediately instead of buffering whole lines.
pub const TELNET_CHARACTER_MODE: [u8; 6] = [
    IAC,
    WILL,
    OPT_ECHO,
    IAC,
    WILL,
    OPT_SUPPRESS_GO_AHEAD,
];

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecodeState {
    #[default]
    Ground,
    Escape,
    ControlSequence,
    Command,
    CommandOption,
    Subnegotiation,
    SubnegotiationCommand,
}

/// Incremental decoder from raw terminal bytes to intents.
///
/// Understands arrow keys in both normal (`ESC [ A`) and application
/// (`ESC O A`) cursor mode and skips telnet negotiation. Sequences may be
/// split across reads.
#[derive(Debug, Default)]
pub struct InputDecoder {
    state: DecodeState,
    after_cr: bool,
}

impl InputDecoder {
    /// Creates a decoder in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the next chunk of bytes.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Intent> {
        bytes.iter().filter_map(|b| self.step(*b)).collect()
    }

    fn step(&mut self, byte: u8) -> Option<Intent> {
        let after_cr = std::mem::replace(&mut self.after_cr, false);
        match self.state {
            DecodeState::Ground => match byte {
                ESC => {
                    self.state = DecodeState::Escape;
                    None
                }
                IAC => {
                    self.state = DecodeState::Command;
                    None
                }
                CTRL_C => Some(Intent::Quit),
                b'\r' => {
                    self.after_cr = true;
                    Some(Intent::PlaceMark)
                }
                b'\n' if after_cr => None,
                b'\n' => Some(Intent::PlaceMark),
                // Telnet sends CR NUL for a bare Enter.
                0 => None,
                other => Intent::from_char(char::from(other)),
            },
            DecodeState::Escape => match byte {
                b'[' | b'O' => {
                    self.state = DecodeState::ControlSequence;
                    None
                }
                ESC => None,
                other => {
                    self.state = DecodeState::Ground;
                    self.step(other)
                }
            },
            DecodeState::ControlSequence => match byte {
                // Parameter and intermediate bytes, e.g. the `1;5` in `ESC [ 1 ; 5 A`.
                0x20..=0x3f => None,
                final_byte => {
                    self.state = DecodeState::Ground;
                    match final_byte {
                        b'A' => Some(Intent::MoveCursor(Direction::Up)),
                        b'B' => Some(Intent::MoveCursor(Direction::Down)),
                        b'C' => Some(Intent::MoveCursor(Direction::Right)),
                        b'D' => Some(Intent::MoveCursor(Direction::Left)),
                        _ => None,
                    }
                }
            },
            DecodeState::Command => {
                self.state = match byte {
                    WILL..=DONT => DecodeState::CommandOption,
                    SB => DecodeState::Subnegotiation,
                    _ => DecodeState::Ground,
                };
                None
            }
            DecodeState::CommandOption => {
                self.state = DecodeState::Ground;
                None
            }
            DecodeState::Subnegotiation => {
                if byte == IAC {
                    self.state = DecodeState::SubnegotiationCommand;
                }
                None
            }
            DecodeState::SubnegotiationCommand => {
                self.state = if byte == SE {
                    DecodeState::Ground
                } else {
                    DecodeState::Subnegotiation
                };
                None
            }
        }
    }
}
