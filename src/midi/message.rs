// Copyright (c) 2024 Mike Tsao

use crate::types::{u7, MidiChannel, MidiNote};
use midly::MidiMessage;

/// A single short MIDI message as it arrives from an input device, plus the
/// time it arrived.
///
/// Only the three bytes of a channel-voice message are kept. Messages that are
/// shorter (program change, channel aftertouch) leave the trailing bytes zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MidiInputMessage {
    /// Status byte followed by up to two data bytes.
    pub bytes: [u8; 3],
    /// Arrival time in microseconds, relative to an arbitrary per-device
    /// origin.
    pub timestamp: u64,
}
impl MidiInputMessage {
    /// Status nibble for note-off.
    pub const NOTE_OFF: u8 = 0x8;
    /// Status nibble for note-on.
    pub const NOTE_ON: u8 = 0x9;

    /// Builds a message from raw bytes. Returns `None` if `bytes` is empty or
    /// too long to be a channel-voice message.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 3 {
            return None;
        }
        let mut r = Self::default();
        r.bytes[..bytes.len()].copy_from_slice(bytes);
        Some(r)
    }

    /// Returns a copy of this message stamped with the given arrival time.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The high four bits of the status byte, which identify the message type.
    pub fn status(&self) -> u8 {
        self.bytes[0] >> 4
    }

    /// The low four bits of the status byte.
    pub fn channel(&self) -> MidiChannel {
        MidiChannel(self.bytes[0] & 0x0f)
    }

    /// The note number of a note-on, note-off, or polyphonic aftertouch
    /// message.
    pub fn note(&self) -> MidiNote {
        MidiNote(self.bytes[1] & 0x7f)
    }

    /// The second data byte: velocity for note messages, value for controller
    /// messages.
    pub fn value(&self) -> u8 {
        self.bytes[2] & 0x7f
    }

    /// Convenience function to make a note-on message.
    pub fn new_note_on(channel: MidiChannel, note: u8, vel: u8) -> Self {
        Self::from((
            channel,
            MidiMessage::NoteOn {
                key: u7::from(note),
                vel: u7::from(vel),
            },
        ))
    }

    /// Convenience function to make a note-off message.
    pub fn new_note_off(channel: MidiChannel, note: u8, vel: u8) -> Self {
        Self::from((
            channel,
            MidiMessage::NoteOff {
                key: u7::from(note),
                vel: u7::from(vel),
            },
        ))
    }
}
impl From<(MidiChannel, MidiMessage)> for MidiInputMessage {
    fn from((channel, message): (MidiChannel, MidiMessage)) -> Self {
        let channel = channel.0 & 0x0f;
        let bytes = match message {
            MidiMessage::NoteOff { key, vel } => [0x80 | channel, key.as_int(), vel.as_int()],
            MidiMessage::NoteOn { key, vel } => [0x90 | channel, key.as_int(), vel.as_int()],
            MidiMessage::Aftertouch { key, vel } => [0xa0 | channel, key.as_int(), vel.as_int()],
            MidiMessage::Controller { controller, value } => {
                [0xb0 | channel, controller.as_int(), value.as_int()]
            }
            MidiMessage::ProgramChange { program } => [0xc0 | channel, program.as_int(), 0],
            MidiMessage::ChannelAftertouch { vel } => [0xd0 | channel, vel.as_int(), 0],
            MidiMessage::PitchBend { bend } => {
                let raw = bend.0.as_int();
                [0xe0 | channel, (raw & 0x7f) as u8, (raw >> 7) as u8]
            }
            #[allow(unreachable_patterns)]
            _ => [0, 0, 0],
        };
        Self {
            bytes,
            timestamp: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_note_on() {
        let m = MidiInputMessage::new_note_on(MidiChannel(3), 60, 100);
        assert_eq!(m.bytes, [0x93, 60, 100]);
        assert_eq!(m.status(), MidiInputMessage::NOTE_ON);
        assert_eq!(m.channel(), MidiChannel(3));
        assert_eq!(m.note(), MidiNote(60));
        assert_eq!(m.value(), 100);
    }

    #[test]
    fn decodes_note_off() {
        let m = MidiInputMessage::new_note_off(MidiChannel(15), 36, 0);
        assert_eq!(m.status(), MidiInputMessage::NOTE_OFF);
        assert_eq!(m.channel(), MidiChannel(15));
        assert_eq!(m.note(), MidiNote(36));
    }

    #[test]
    fn from_bytes_pads_short_messages() {
        let m = MidiInputMessage::from_bytes(&[0xc2, 5]).unwrap();
        assert_eq!(m.bytes, [0xc2, 5, 0]);
        assert_eq!(m.status(), 0xc);

        assert!(MidiInputMessage::from_bytes(&[]).is_none());
        assert!(MidiInputMessage::from_bytes(&[0xf0, 1, 2, 3]).is_none());
    }

    #[test]
    fn timestamp_is_carried() {
        let m = MidiInputMessage::new_note_on(MidiChannel::default(), 1, 2).with_timestamp(1234);
        assert_eq!(m.timestamp, 1234);
    }
}
