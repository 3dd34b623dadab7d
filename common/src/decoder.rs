
use crate::asm::*;

fn decode_nop(word: u16) -> Option<Ins> {
    (word == Ins::NOP).then_some(Ins::Nop)
}

type Decoder = fn(u16) -> Option<Ins>;

const DECODERS: &[Decoder] = &[
    decode_nop,
    RdIns::decode,
];

pub fn decode(word: u16) -> Option<Ins> {
    DECODERS.iter().find_map(|decoder| decoder(word))
}
