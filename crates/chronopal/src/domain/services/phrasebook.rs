//! Phrasebook - Rule-based pet dialogue
//!
//! Deterministic replies used when no language model is configured or the
//! model call fails. Selection depends only on the message and pet context.

use crate::domain::entities::PetContext;
use crate::domain::value_objects::{Mood, SassLevel};

/// Battery level below which the pet complains about being tired
const LOW_BATTERY: i32 = 20;

/// Level from which the pet brags about its smarts
const BRAG_LEVEL: i32 = 5;

fn openers(sass: SassLevel) -> &'static [&'static str] {
    match sass {
        SassLevel::Sweet => &[
            "Oh hey there! Just customizing my MySpace profile.",
            "Hi hi! Thanks for stopping by my corner of the web.",
            "Hey friend! My away message says I'm always here for you.",
        ],
        SassLevel::Playful => &[
            "BRB, just updating my AIM away message... oh wait, you're still here?",
            "LOL, you again? Let me pause my Winamp playlist.",
            "Hold on, I'm burning a mix CD. Okay, go.",
        ],
        SassLevel::Snarky => &[
            "You again? I was just about to start my 56k modem... *sigh*",
            "Ugh, fine. My GeoCities page can wait.",
            "Sure, interrupt my Neopets grind. Totally cool.",
        ],
        SassLevel::Sassy => &[
            "Oh great, another interaction. My MySpace top 8 is getting crowded...",
            "Did you just poke me? This isn't Facebook circa 2004.",
            "Let me guess, you want attention. Get in line behind my Tamagotchi.",
        ],
        SassLevel::Savage => &[
            "What now? I was just about to win an argument on a Geocities guestbook...",
            "Your message has been forwarded to /dev/null. Just kidding. Mostly.",
            "I've seen better conversation in a spam folder from 2002.",
        ],
    }
}

fn mood_remark(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Life is good, like a fresh Napster download.",
        Mood::Content => "Things are chill.",
        Mood::Neutral => "Whatever.",
        Mood::Grumpy => "Where have you been? I've been staring at a loading bar.",
        Mood::Angry => "You left me hanging longer than a dial-up handshake!",
    }
}

/// Stable FNV-1a hash so the same message always picks the same phrase
fn fingerprint(text: &str) -> u64 {
    text.bytes().fold(0xcbf29ce484222325_u64, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x100000001b3)
    })
}

/// Compose a reply from the pet's sass tier, mood, battery and level
pub fn fallback_reply(message: &str, ctx: &PetContext) -> String {
    let options = openers(ctx.sass_level);
    let index = (fingerprint(message.trim()) % options.len() as u64) as usize;

    let mut reply = format!("{} {}", options[index], mood_remark(ctx.mood));

    if ctx.battery_level < LOW_BATTERY {
        reply.push_str(" My battery is running on fumes, btw.");
    }
    if ctx.level >= BRAG_LEVEL {
        reply.push_str(&format!(" Level {} genius, by the way.", ctx.level));
    }

    reply
}

/// What a depleted pet says to anyone who pokes it
pub fn depleted_reply(ctx: &PetContext) -> String {
    format!(
        "{} is out of battery. *static* Reset me to start over.",
        ctx.name
    )
}

/// How a tier should sound, used to brief the language model
pub fn persona_brief(sass: SassLevel) -> &'static str {
    match sass {
        SassLevel::Sweet => "mildly sassy, mostly helpful, basic early 2000s references",
        SassLevel::Playful => "more confident, slightly sarcastic, references AIM and early social media",
        SassLevel::Snarky => "noticeably sassy, frequent sarcastic remarks, early internet memes",
        SassLevel::Sassy => "very sassy with sharp wit, old-school internet culture",
        SassLevel::Savage => "maximum sass, expert-level sarcasm, deep cuts of early internet culture",
    }
}
