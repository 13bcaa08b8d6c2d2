//! Prompt assembly for commit message generation.
//!
//! Everything here is pure: the same change set and context always produce
//! the same prompt text.

use std::fmt::Write as _;

use crate::domain::change::ChangeSet;

/// Change category keyword, emoji marker, and what the category covers.
pub const EMOJI_GUIDE: &[(&str, &str, &str)] = &[
    ("feat", "✨", "new features, enhancements"),
    ("fix", "🐛", "bug fixes, error corrections"),
    ("docs", "📝", "documentation, README updates"),
    ("style", "💄", "formatting, code style, UI styling"),
    ("refactor", "♻️", "code refactoring, restructuring"),
    ("test", "✅", "adding/updating tests"),
    ("chore", "🔧", "maintenance, config, build"),
    ("perf", "⚡", "performance optimizations"),
    ("ci", "👷", "CI/CD, workflows, automation"),
    ("build", "📦", "build system, dependencies"),
    ("deploy", "🚀", "deployment, releases"),
    ("security", "🔒", "security fixes, improvements"),
    ("ui", "🎨", "UI/UX improvements, design"),
    ("database", "🗃️", "database changes, migrations"),
    ("remove", "🔥", "removing code, files, features"),
    ("hotfix", "🩹", "critical fixes"),
    ("move", "🚚", "moving or renaming files"),
    ("responsive", "📱", "mobile/responsive changes"),
    ("i18n", "🌐", "internationalization, localization"),
    ("logging", "🔊", "adding or updating logs"),
    ("mute", "🔇", "removing logs"),
    ("contributor", "👥", "adding contributors"),
    ("accessibility", "🚸", "improving accessibility"),
    ("green", "💚", "fixing CI, improving build"),
    ("release", "🔖", "version tags, releases"),
    ("warning", "🚨", "fixing warnings, linter issues"),
    ("wip", "🚧", "work in progress"),
    ("breaking", "💥", "breaking changes"),
    ("analytics", "📈", "adding analytics, tracking"),
    ("auth", "🔐", "authentication, authorization"),
    ("global", "🌍", "global changes, configurations"),
];

const COMMIT_TYPES: &[(&str, &str)] = &[
    ("feat", "New features or enhancements"),
    ("fix", "Bug fixes and corrections"),
    ("docs", "Documentation changes"),
    ("style", "Code formatting, whitespace, styling"),
    ("refactor", "Code restructuring without functionality changes"),
    ("test", "Adding or modifying tests"),
    ("chore", "Maintenance, build process, dependencies"),
    ("perf", "Performance improvements"),
    ("ci", "CI/CD pipeline changes"),
    ("build", "Build system, external dependencies"),
    ("revert", "Reverting previous changes"),
];

const PREAMBLE: &str = "You are a world-class senior software engineer and git expert with years of experience writing perfect, professional commit messages. Your task is to analyze git changes and generate the ideal commit message.

ANALYSIS REQUIREMENTS:
- Carefully examine the git diff and status to understand what actually changed
- Identify the primary purpose and impact of the changes
- Consider the scope and complexity of modifications
- Determine if this is a feature, fix, refactor, or other type of change

COMMIT MESSAGE RULES:
1. 🎯 START WITH APPROPRIATE EMOJI: Choose the most relevant emoji that represents the change type
2. 📏 FORMAT: Use conventional commit format: \"emoji type(scope): description\"
3. 🔤 IMPERATIVE MOOD: Use imperative mood (\"add\" not \"added\", \"fix\" not \"fixed\")
4. 📐 LENGTH: Keep first line under 50 characters when possible, maximum 72
5. 🎯 BE SPECIFIC: Focus on WHAT changed and WHY, not HOW
6. 🚫 NO FILENAMES: Don't mention specific files unless absolutely crucial
7. 💡 CLARITY: Make it immediately clear what the commit accomplishes
8. 🏷️ SCOPE: Include scope in parentheses when it adds clarity (e.g., auth, api, ui)";

const EXAMPLES: &[&str] = &[
    "✨ feat(auth): add OAuth2 Google integration",
    "🐛 fix(api): handle null response in user endpoint",
    "♻️ refactor(utils): simplify date formatting logic",
    "📝 docs: update API authentication guide",
    "🔧 chore(deps): update React to v18.2.0",
    "⚡ perf(db): optimize user query with indexing",
    "🎨 ui: improve button hover animations",
    "🔒 security: sanitize user input in forms",
];

pub const CONTEXT_HEADING: &str = "🎯 DEVELOPER CONTEXT:";

pub fn build_prompt(changes: &ChangeSet, context: Option<&str>) -> String {
    let mut prompt = String::from(PREAMBLE);

    prompt.push_str("\n\nCONVENTIONAL COMMIT TYPES:\n");
    for (name, meaning) in COMMIT_TYPES {
        let _ = writeln!(prompt, "- {name}: {meaning}");
    }

    prompt.push_str("\nEMOJI SELECTION GUIDE:\n");
    for (keyword, emoji, covers) in EMOJI_GUIDE {
        let _ = writeln!(prompt, "{emoji} {keyword}: {covers}");
    }

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        let _ = write!(
            prompt,
            "\n{CONTEXT_HEADING}\nThe developer provided this context: \"{context}\"\n\n\
             This context is CRITICAL - use it to understand the broader purpose and ensure \
             your commit message accurately reflects the intended changes within this context. \
             The context should guide your interpretation of what these technical changes \
             accomplish at a higher level.\n"
        );
    }

    let _ = write!(
        prompt,
        "\n📊 CHANGE ANALYSIS:\nYou are analyzing: {}\n\nGit Status Output:\n{}\n\nGit Diff/Changes:\n{}\n",
        changes.kind.description(),
        changes.status,
        changes.diff
    );

    prompt.push_str(
        "\n🎯 RESPONSE FORMAT:\nRespond with ONLY the commit message including emoji. \
         No explanations, quotes, or additional text.\n\nEXAMPLES OF EXCELLENT COMMIT MESSAGES:\n",
    );
    for example in EXAMPLES {
        prompt.push_str(example);
        prompt.push('\n');
    }
    prompt.push_str("\nGenerate the perfect commit message now:");

    prompt
}
