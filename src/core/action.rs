//! Byte-stream input decoding.
//!
//! The decoder is a push state machine: feed it one raw unit at a time and it
//! either yields a resolved [`Action`] or asks for more bytes. Escape
//! sub-sequences consume exactly the units their grammar names, so a
//! truncated or unrecognized sequence degrades to [`Action::Ignore`] without
//! ever corrupting editor state.

/// A resolved input event, consumed by exhaustive matching in the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Backspace,
    ForwardDelete,
    MoveLeft,
    MoveRight,
    HistoryOlder,
    HistoryNewer,
    Home,
    End,
    ClearScreen,
    /// Absorbed without effect: unmapped control bytes, unknown escape
    /// suffixes, invalid UTF-8.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Base,
    SawEsc,
    SawSs3,
    SawCsi,
    /// `ESC [ 3` seen; one terminator unit remains to discard.
    CsiDeleteTail,
    Utf8 {
        buf: [u8; 4],
        len: u8,
        need: u8,
    },
}

const ESC: u8 = 0x1b;
const SS3: u8 = 0x4f;
const CSI: u8 = 0x5b;
const DEL: u8 = 0x7f;
const FORM_FEED: u8 = 0x0c;

/// Escape-sequence decoder for a raw-mode byte stream.
#[derive(Debug)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Self { state: State::Base }
    }

    /// Forget any partially consumed sequence. Called between lines so a
    /// stream cut mid-sequence cannot leak into the next read.
    pub fn reset(&mut self) {
        self.state = State::Base;
    }

    /// Consume one input unit. `None` means the unit was absorbed into an
    /// unfinished sequence and more bytes are needed.
    pub fn feed(&mut self, unit: u8) -> Option<Action> {
        match self.state {
            State::Base => self.feed_base(unit),
            State::SawEsc => {
                self.state = match unit {
                    SS3 => State::SawSs3,
                    CSI => State::SawCsi,
                    _ => return self.done(Action::Ignore),
                };
                None
            }
            State::SawSs3 => self.done(match unit {
                0x46 => Action::End,
                0x48 => Action::Home,
                _ => Action::Ignore,
            }),
            State::SawCsi => match unit {
                0x41 => self.done(Action::HistoryOlder),
                0x42 => self.done(Action::HistoryNewer),
                0x43 => self.done(Action::MoveRight),
                0x44 => self.done(Action::MoveLeft),
                0x33 => {
                    self.state = State::CsiDeleteTail;
                    None
                }
                _ => self.done(Action::Ignore),
            },
            // The terminator (normally `~`) carries no information.
            State::CsiDeleteTail => self.done(Action::ForwardDelete),
            State::Utf8 { buf, len, need } => self.feed_utf8(unit, buf, len, need),
        }
    }

    fn done(&mut self, action: Action) -> Option<Action> {
        self.state = State::Base;
        Some(action)
    }

    fn feed_base(&mut self, unit: u8) -> Option<Action> {
        match unit {
            DEL => Some(Action::Backspace),
            FORM_FEED => Some(Action::ClearScreen),
            ESC => {
                self.state = State::SawEsc;
                None
            }
            b if b < 0x20 => Some(Action::Ignore),
            b if b < 0x80 => Some(Action::Insert(b as char)),
            b => {
                let need = match b {
                    0xc2..=0xdf => 1,
                    0xe0..=0xef => 2,
                    0xf0..=0xf4 => 3,
                    // Stray continuation byte or invalid lead.
                    _ => return Some(Action::Ignore),
                };
                self.state = State::Utf8 {
                    buf: [b, 0, 0, 0],
                    len: 1,
                    need,
                };
                None
            }
        }
    }

    fn feed_utf8(&mut self, unit: u8, mut buf: [u8; 4], len: u8, need: u8) -> Option<Action> {
        if !(0x80..=0xbf).contains(&unit) {
            // Sequence broken off; drop it and reinterpret this unit fresh.
            self.state = State::Base;
            return self.feed(unit);
        }

        buf[len as usize] = unit;
        let len = len + 1;
        if len < 1 + need {
            self.state = State::Utf8 { buf, len, need };
            return None;
        }

        self.state = State::Base;
        match std::str::from_utf8(&buf[..len as usize]) {
            Ok(text) => text.chars().next().map(Action::Insert),
            Err(_) => Some(Action::Ignore),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
