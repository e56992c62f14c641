//! Context-sensitive readings for the structural particles 的, 地 and 得
//!
//! These are pattern heuristics over the immediate neighbours, not a
//! grammar. Inputs outside the covered patterns keep the dictionary's
//! primary reading.

use crate::text::is_qualifying;

/// Neutral-tone reading shared by all three particles
pub const NEUTRAL_READING: &str = "de";

pub const PARTICLES: [char; 3] = ['的', '地', '得'];

// 的 compounds with a full-tone reading
const DE_DI_FOLLOWERS: &[char] = &['确']; // 的确 dí
const DE_DI4_LEADERS: &[char] = &['目']; // 目的 dì
const DE_DI1_LEADERS: &[char] = &['打']; // 打的 dī

// Nouns built on 地 (土地, 地方 ...): keep dì
const DI_NOUN_LEADERS: &[char] = &[
    '土', '天', '大', '田', '草', '场', '基', '当', '各', '本', '外', '内', '陆', '山', '此', '境',
    '余', '目', '产', '园', '营', '盆', '腹', '高', '平', '领', '墓', '工',
];
const DI_NOUN_FOLLOWERS: &[char] = &[
    '方', '区', '球', '图', '址', '点', '下', '上', '面', '铁', '震', '位', '理', '带', '道', '毯',
    '板', '主', '形', '狱', '质', '域', '步',
];

// Words where 得 is a full-tone verb (获得 huòdé ...)
const DE_VERB_LEADERS: &[char] = &[
    '获', '取', '赢', '难', '求', '博', '夺', '所', '应', '习', '心', '值',
];
// Lexicalised words with a neutral 得 (觉得 juéde ...)
const DE_NEUTRAL_LEADERS: &[char] = &['觉', '记', '懂', '晓', '免', '省', '舍', '显', '使', '怪'];
// 得 starting a verb compound (得到 dédào ...)
const DE_VERB_FOLLOWERS: &[char] = &[
    '到', '分', '意', '知', '出', '失', '罪', '益', '奖', '胜', '逞', '体', '力', '手', '以',
];

pub fn is_particle(ch: char) -> bool {
    PARTICLES.contains(&ch)
}

/// Neighbourhood of one input position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Neighbors {
    before2: Option<char>,
    before: Option<char>,
    after: Option<char>,
}

impl Neighbors {
    fn at(chars: &[char], index: usize) -> Self {
        Self {
            before2: index.checked_sub(2).and_then(|i| chars.get(i).copied()),
            before: index.checked_sub(1).and_then(|i| chars.get(i).copied()),
            after: chars.get(index + 1).copied(),
        }
    }

    fn before_is_hanzi(&self) -> bool {
        self.before.is_some_and(is_qualifying)
    }

    fn after_is_hanzi(&self) -> bool {
        self.after.is_some_and(is_qualifying)
    }

    /// AA + particle, e.g. 慢慢地
    fn is_reduplicated(&self) -> bool {
        match (self.before2, self.before) {
            (Some(a), Some(b)) => a == b && is_qualifying(a),
            _ => false,
        }
    }

    fn before_in(&self, set: &[char]) -> bool {
        self.before.is_some_and(|ch| set.contains(&ch))
    }

    fn after_in(&self, set: &[char]) -> bool {
        self.after.is_some_and(|ch| set.contains(&ch))
    }
}

/// Pick the context reading for the particle at `chars[index]`
///
/// Returns `None` when the context does not call for an override; the
/// caller then keeps the primary reading. `candidates` are the dictionary
/// readings for the particle; an override prefers the candidate spelled the
/// same as the chosen reading.
pub fn resolve_particle(chars: &[char], index: usize, candidates: &[String]) -> Option<String> {
    let ch = *chars.get(index)?;
    let around = Neighbors::at(chars, index);

    let reading = match ch {
        '的' => resolve_de_possessive(&around),
        '地' => resolve_de_adverbial(&around),
        '得' => resolve_de_complement(&around),
        _ => None,
    }?;

    Some(
        candidates
            .iter()
            .find(|c| c.as_str() == reading)
            .cloned()
            .unwrap_or_else(|| reading.to_string()),
    )
}

fn resolve_de_possessive(around: &Neighbors) -> Option<&'static str> {
    if around.after_in(DE_DI_FOLLOWERS) {
        return Some("dí");
    }
    if around.before_in(DE_DI4_LEADERS) {
        return Some("dì");
    }
    if around.before_in(DE_DI1_LEADERS) {
        return Some("dī");
    }
    if around.before_is_hanzi() {
        return Some(NEUTRAL_READING);
    }
    None
}

fn resolve_de_adverbial(around: &Neighbors) -> Option<&'static str> {
    if around.is_reduplicated() {
        return Some(NEUTRAL_READING);
    }
    if around.before_in(DI_NOUN_LEADERS) || around.after_in(DI_NOUN_FOLLOWERS) {
        return None;
    }
    if around.before_is_hanzi() && around.after_is_hanzi() {
        return Some(NEUTRAL_READING);
    }
    None
}

fn resolve_de_complement(around: &Neighbors) -> Option<&'static str> {
    if around.before_in(DE_VERB_LEADERS) {
        return Some("dé");
    }
    if around.before_in(DE_NEUTRAL_LEADERS) {
        return Some(NEUTRAL_READING);
    }
    if around.after_in(DE_VERB_FOLLOWERS) {
        return Some("dé");
    }
    if around.is_reduplicated() || (around.before_is_hanzi() && around.after_is_hanzi()) {
        return Some(NEUTRAL_READING);
    }
    None
}
