pub const BASE_HOOK_STRENGTH: f64 = 5.0;
pub const MAX_HOOK_STRENGTH: f64 = 10.0;

pub const QUESTION_MARK_BONUS: f64 = 1.5;
pub const QUESTION_WORD_BONUS: f64 = 1.0;
pub const DIGIT_BONUS: f64 = 0.8;
pub const POWER_WORD_BONUS: f64 = 1.2;
pub const HIGH_SCORE_BONUS: f64 = 1.0;
pub const MID_SCORE_BONUS: f64 = 0.5;

pub const HIGH_SCORE_THRESHOLD: f64 = 80.0;
pub const MID_SCORE_THRESHOLD: f64 = 60.0;

pub const QUESTION_WORDS: &[&str] = &["how", "why", "what", "secret", "truth"];
pub const POWER_WORDS: &[&str] = &["shocking", "amazing", "incredible", "unbelievable"];

pub const TIMING_FACTOR_RANGE: (f64, f64) = (6.0, 9.0);
pub const ENGAGEMENT_MULTIPLIER_RANGE: (f64, f64) = (0.7, 0.9);

pub const DEFAULT_EMOTION: &str = "curiosity";

pub struct EmotionRule {
    pub emotion: &'static str,
    pub keywords: &'static [&'static str],
}

// first matching rule wins
pub const EMOTION_TRIGGERS: &[EmotionRule] = &[
    EmotionRule {
        emotion: "curiosity",
        keywords: &["how", "why", "what", "secret", "truth", "revealed", "discover"],
    },
    EmotionRule {
        emotion: "excitement",
        keywords: &["amazing", "incredible", "shocking", "unbelievable", "breakthrough"],
    },
    EmotionRule {
        emotion: "fear",
        keywords: &["warning", "danger", "avoid", "mistake", "fail", "wrong"],
    },
    EmotionRule {
        emotion: "joy",
        keywords: &["happy", "success", "win", "achievement", "celebration"],
    },
    EmotionRule {
        emotion: "anger",
        keywords: &["outrage", "scandal", "exposed", "lies", "betrayal"],
    },
];

pub const CONTENT_STRUCTURES: &[(&str, &[&str])] = &[
    (
        "reddit",
        &["story-telling", "problem-solution", "educational", "rant"],
    ),
    ("youtube", &["tutorial", "entertainment", "vlog-style", "review"]),
    ("google", &["informational", "listicle", "how-to", "comparison"]),
    ("bing", &["news-style", "analytical", "research-based"]),
];
pub const FALLBACK_STRUCTURES: &[&str] = &["standard"];

pub const TARGETED_APPEAL: &str = "targeted niche";
pub const BROAD_APPEAL: &str = "broad appeal";

pub const INSIGHT_STRONG_HOOK: &str = "Strong attention-grabbing title";
pub const INSIGHT_HIGH_ENGAGEMENT: &str = "High engagement potential";
pub const INSIGHT_CURIOSITY_GAP: &str = "Leverages curiosity gap effectively";
pub const INSIGHT_COMMUNITY: &str = "Community-focused approach";
pub const INSIGHT_VISUAL: &str = "Visual storytelling opportunity";
pub const INSIGHT_FILLER: &str = "Engaging content approach";

pub const STRONG_HOOK_THRESHOLD: f64 = 7.0;
pub const HIGH_ENGAGEMENT_THRESHOLD: f64 = 70.0;

pub const TECH_FACTOR_KEYWORDS: &[&str] = &["programming", "ai"];
pub const MONEY_FACTOR_KEYWORDS: &[&str] = &["money", "business", "success"];
pub const FACTOR_TECH: &str = "Trending tech topic";
pub const FACTOR_MONEY: &str = "Financial motivation";
pub const FACTOR_VALUE: &str = "Clear value proposition";
pub const FACTOR_DISCUSSION: &str = "Discussion-worthy content";
pub const FACTOR_FILLER: &str = "Platform-appropriate format";
pub const DISCUSSION_COMMENT_THRESHOLD: u64 = 100;

pub const ADAPT_VIDEO: &str = "Create video version";
pub const ADAPT_COMMUNITY: &str = "Adapt for community discussion";
pub const ADAPT_PERSONAL: &str = "Add personal experience examples";
pub const ADAPT_CODE: &str = "Include code examples or demos";

pub const LIST_LEN: usize = 3;

pub struct OpportunityRule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
    pub angle: &'static str,
    pub audience: &'static str,
    pub commission: &'static str,
    pub products: &'static [&'static str],
}

pub const OPPORTUNITY_RULES: &[OpportunityRule] = &[
    OpportunityRule {
        keywords: &["programming", "coding", "development"],
        category: "programming tools",
        angle: "developer productivity",
        audience: "programmers and developers",
        commission: "high",
        products: &["coding IDEs", "learning platforms", "development tools"],
    },
    OpportunityRule {
        keywords: &["ai", "artificial intelligence", "machine learning"],
        category: "AI tools",
        angle: "AI automation",
        audience: "tech enthusiasts and businesses",
        commission: "high",
        products: &["AI platforms", "automation tools", "AI courses"],
    },
    OpportunityRule {
        keywords: &["business", "money", "success", "entrepreneur"],
        category: "business tools",
        angle: "business growth",
        audience: "entrepreneurs and business owners",
        commission: "medium",
        products: &["business software", "courses", "productivity tools"],
    },
];

pub const FALLBACK_OPPORTUNITY: OpportunityRule = OpportunityRule {
    keywords: &[],
    category: "general productivity",
    angle: "efficiency improvement",
    audience: "professionals",
    commission: "medium",
    products: &["productivity apps", "online courses", "digital tools"],
};

pub const CONTENT_ANGLES: &[(&str, [&str; 3])] = &[
    (
        "reddit",
        [
            "Personal experience story",
            "Community discussion starter",
            "Educational breakdown",
        ],
    ),
    (
        "youtube",
        [
            "Tutorial walkthrough",
            "Behind-the-scenes journey",
            "Comparison review",
        ],
    ),
    (
        "google",
        ["Comprehensive guide", "Step-by-step tutorial", "Expert analysis"],
    ),
    (
        "bing",
        [
            "News-style coverage",
            "Research-backed analysis",
            "Industry insight",
        ],
    ),
];
pub const FALLBACK_ANGLES_PLATFORM: &str = "reddit";

pub const CALL_TO_ACTIONS: &[(&str, [&str; 3])] = &[
    (
        "reddit",
        [
            "Comment your experience below",
            "Join the discussion in comments",
            "Share your own tips",
        ],
    ),
    (
        "youtube",
        [
            "Subscribe for more tutorials",
            "Like if this helped you",
            "Download the free guide",
        ],
    ),
    (
        "google",
        [
            "Read the full guide here",
            "Get the complete toolkit",
            "Start your free trial",
        ],
    ),
    (
        "bing",
        [
            "Learn more about this topic",
            "Explore related resources",
            "Get expert consultation",
        ],
    ),
];
pub const FALLBACK_CTA_PLATFORM: &str = "google";

pub struct AudienceRule {
    pub category_match: &'static str,
    pub audience: &'static str,
}

pub const AUDIENCE_RULES: &[AudienceRule] = &[
    AudienceRule {
        category_match: "programming",
        audience: "Developers, programmers, and tech professionals interested in coding tools and career growth",
    },
    AudienceRule {
        category_match: "ai",
        audience: "Tech enthusiasts, business owners, and professionals exploring AI automation",
    },
    AudienceRule {
        category_match: "business",
        audience: "Entrepreneurs, business owners, and professionals seeking growth strategies",
    },
];
pub const FALLBACK_AUDIENCE: &str =
    "Digital professionals and content creators looking to improve productivity";

pub const PRODUCTS_PER_OPPORTUNITY: usize = 2;
pub const MAX_AFFILIATE_PRODUCTS: usize = 3;
pub const FALLBACK_AFFILIATE_PRODUCTS: &[&str] =
    &["productivity tools", "online courses", "software solutions"];

pub const CONTENT_OUTLINES: &[(&str, [&str; 5])] = &[
    (
        "problem-solution",
        [
            "Hook: Present the problem everyone faces",
            "Agitate: Explain why this problem matters",
            "Solution: Introduce your method/tool",
            "Proof: Show results or evidence",
            "Action: Clear next steps for readers",
        ],
    ),
    (
        "tutorial",
        [
            "Hook: Promise what they'll learn",
            "Overview: What you'll cover",
            "Step-by-step walkthrough",
            "Common mistakes to avoid",
            "Next steps and resources",
        ],
    ),
    (
        "story-telling",
        [
            "Hook: Start with compelling moment",
            "Background: Set the scene",
            "Journey: What happened",
            "Lesson: Key takeaway",
            "Application: How others can use this",
        ],
    ),
];
pub const FALLBACK_OUTLINE: &str = "problem-solution";

pub struct TopicRule {
    pub keywords: &'static [&'static str],
    pub topics: [&'static str; 4],
}

pub const TRENDING_TOPICS: &[TopicRule] = &[
    TopicRule {
        keywords: &["programming", "coding"],
        topics: [
            "AI coding",
            "remote work",
            "tech careers",
            "programming productivity",
        ],
    },
    TopicRule {
        keywords: &["ai", "artificial intelligence"],
        topics: [
            "AI automation",
            "machine learning",
            "chatbots",
            "AI productivity",
        ],
    },
    TopicRule {
        keywords: &["business", "money", "success"],
        topics: [
            "digital marketing",
            "side hustles",
            "passive income",
            "business automation",
        ],
    },
];
pub const FALLBACK_TOPICS: [&str; 4] =
    ["productivity", "remote work", "digital tools", "online learning"];

pub const BRIEF_TITLE_PREFIX: &str = "Content Brief: ";
pub const BRIEF_TITLE_CHARS: usize = 50;

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn lookup<'a, V>(table: &'a [(&str, V)], key: &str) -> Option<&'a V> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| value)
}

pub fn structures_for(platform_key: &str) -> &'static [&'static str] {
    lookup(CONTENT_STRUCTURES, platform_key)
        .copied()
        .unwrap_or(FALLBACK_STRUCTURES)
}

pub fn content_angles_for(platform_key: &str) -> &'static [&'static str; 3] {
    lookup(CONTENT_ANGLES, platform_key)
        .or_else(|| lookup(CONTENT_ANGLES, FALLBACK_ANGLES_PLATFORM))
        .unwrap_or(&CONTENT_ANGLES[0].1)
}

pub fn call_to_actions_for(platform_key: &str) -> &'static [&'static str; 3] {
    lookup(CALL_TO_ACTIONS, platform_key)
        .or_else(|| lookup(CALL_TO_ACTIONS, FALLBACK_CTA_PLATFORM))
        .unwrap_or(&CALL_TO_ACTIONS[2].1)
}

pub fn outline_for(structure: &str) -> &'static [&'static str; 5] {
    lookup(CONTENT_OUTLINES, structure)
        .or_else(|| lookup(CONTENT_OUTLINES, FALLBACK_OUTLINE))
        .unwrap_or(&CONTENT_OUTLINES[0].1)
}
