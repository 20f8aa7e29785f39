//! Call-to-action story prompts and landing-page counters

use serde::Serialize;
use crate::config::DashboardConfig;

/// Story shown before following a call-to-action link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Story {
    pub title: &'static str,
    pub image: &'static str,
    pub text: &'static str,
    pub credit: &'static str,
}

const DONATE: Story = Story {
    title: "Your Donation Heals — Animal Aid Unlimited, Udaipur",
    image: "https://images.unsplash.com/photo-1546182990-dffeafbe841d?q=80&w=1600&auto=format&fit=crop",
    text: "Donations funded life-saving treatment for an injured cow. Your support pays for medication, transport, and shelter care so rescues can recover fully.",
    credit: "Story inspired by Animal Aid Unlimited, Udaipur",
};

const REPORT: Story = Story {
    title: "A Report That Saved a Life — RESQ Trust, Pune",
    image: "https://images.unsplash.com/photo-1500534314209-a25ddb2bd429?q=80&w=1600&auto=format&fit=crop",
    text: "A citizen report alerted responders to a buffalo hit by traffic. Rapid coordination ensured safe transport to a hospital for treatment.",
    credit: "Story inspired by RESQ Charitable Trust, Pune",
};

const HERO: Story = Story {
    title: "Become a Hero — People for Animals (PFA)",
    image: "https://images.unsplash.com/photo-1583336663277-620dc1996580?q=80&w=1600&auto=format&fit=crop",
    text: "PFA volunteers help goats, dogs, and other animals with pickups, first aid, and fostering. Join the network and make a direct impact.",
    credit: "Story inspired by People for Animals (PFA)",
};

/// Story registered for a CTA action (`donate`, `report`, `hero`)
pub fn story_for(action: &str) -> Option<&'static Story> {
    match action {
        "donate" => Some(&DONATE),
        "report" => Some(&REPORT),
        "hero" => Some(&HERO),
        _ => None,
    }
}

/// What the story modal shows after a CTA click was intercepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaPrompt {
    pub story: Option<&'static Story>,
    /// Where "continue" leads: the CTA's data target, else its href, else `#`
    pub continue_href: String,
}

pub fn intercept_cta(action: &str, data_target: Option<&str>, href: Option<&str>) -> CtaPrompt {
    let continue_href = data_target
        .filter(|t| !t.is_empty())
        .or(href.filter(|h| !h.is_empty()))
        .unwrap_or("#")
        .to_string();

    CtaPrompt {
        story: story_for(action),
        continue_href,
    }
}

/// Landing-page counter targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterTargets {
    pub rescues: u64,
    pub ngos: u64,
    pub volunteers: u64,
    pub adoptions: u64,
}

/// Counter values `elapsed_ms` into an animation lasting `duration_ms`.
///
/// Each value is `floor(progress * target)` with progress clamped to 1.
pub fn counter_frame(targets: CounterTargets, elapsed_ms: u64, duration_ms: u64) -> CounterTargets {
    let progress = if duration_ms == 0 {
        1.0
    } else {
        (elapsed_ms as f64 / duration_ms as f64).min(1.0)
    };
    let scale = |target: u64| (progress * target as f64).floor() as u64;

    CounterTargets {
        rescues: scale(targets.rescues),
        ngos: scale(targets.ngos),
        volunteers: scale(targets.volunteers),
        adoptions: scale(targets.adoptions),
    }
}

/// Counter values `elapsed_ms` into the animation, over the configured duration
pub fn configured_counter_frame(config: &DashboardConfig, targets: CounterTargets, elapsed_ms: u64) -> CounterTargets {
    counter_frame(targets, elapsed_ms, config.counter_duration_ms)
}
