//! Plan sources: the builtin UI-redesign plan and TOML plan files.
//!
//! The builtin plan seeds the cyberpunk UI upgrade project: type, phase,
//! domain, priority, and size labels, two phase milestones, and five epics
//! with their task breakdowns. A custom plan can be supplied as a TOML
//! file via `--plan`.

use crate::models::{EpicSpec, LabelSpec, MilestoneSpec, Plan, TaskSpec};
use crate::Result;
use std::path::Path;

/// Load a plan from a TOML file and validate it.
pub fn load(path: &Path) -> Result<Plan> {
    let text = std::fs::read_to_string(path)?;
    let plan: Plan = toml::from_str(&text)?;
    plan.validate()?;
    Ok(plan)
}

/// Resolve the plan: a file if one was given, otherwise the builtin.
pub fn resolve(path: Option<&Path>) -> Result<Plan> {
    match path {
        Some(path) => load(path),
        None => Ok(builtin()),
    }
}

const PHASE_1: &str = "Phase 1: Visual Style Refactoring";
const PHASE_2: &str = "Phase 2: Interaction Enhancement & Character System";

/// The builtin desired state for the UI-redesign project.
pub fn builtin() -> Plan {
    Plan {
        project: "UI/UX Cyberpunk Upgrade".to_string(),
        slug: "nav_blog".to_string(),
        labels: labels(),
        milestones: milestones(),
        epics: vec![epic1(), epic2(), epic3(), epic4(), epic5()],
    }
}

fn labels() -> Vec<LabelSpec> {
    vec![
        // Type labels
        LabelSpec::new("epic", "7057ff", "Epic issue containing multiple tasks"),
        LabelSpec::new("feature", "a2eeef", "New feature or request"),
        LabelSpec::new("enhancement", "84b6eb", "Enhancement to existing feature"),
        LabelSpec::new("testing", "d4c5f9", "Testing related tasks"),
        LabelSpec::new("documentation", "0075ca", "Documentation improvements"),
        // Phase labels
        LabelSpec::new("phase-1", "fbca04", "Phase 1: Visual Style Refactoring"),
        LabelSpec::new("phase-2", "d93f0b", "Phase 2: Interaction Enhancement"),
        // Domain labels
        LabelSpec::new("ui", "e99695", "UI/Frontend related"),
        LabelSpec::new("backend", "c2e0c6", "Backend related"),
        LabelSpec::new("animation", "f9d0c4", "Animation and effects"),
        LabelSpec::new("design", "fef2c0", "Design assets and styling"),
        LabelSpec::new("performance", "bfd4f2", "Performance optimization"),
        // Priority labels
        LabelSpec::new("priority-p0", "b60205", "Critical priority"),
        LabelSpec::new("priority-p1", "d93f0b", "High priority"),
        LabelSpec::new("priority-p2", "fbca04", "Medium priority"),
        LabelSpec::new("priority-p3", "0e8a16", "Low priority"),
        // Size labels
        LabelSpec::new("size-small", "c5def5", "1-2 hours"),
        LabelSpec::new("size-medium", "bfdadc", "2-3 hours"),
        LabelSpec::new("size-large", "d4c5f9", "3-4 hours"),
    ]
}

fn milestones() -> Vec<MilestoneSpec> {
    vec![
        MilestoneSpec {
            title: PHASE_1.to_string(),
            description: "Establish cyberpunk visual foundation with core visual upgrades. \
                          Includes Epic 1 (Cyberpunk Visual Style), Epic 2 (Particle Background), \
                          Epic 3 (3D Card Effects)."
                .to_string(),
            state: "open".to_string(),
        },
        MilestoneSpec {
            title: PHASE_2.to_string(),
            description: "Add anime elements and interactive features. Includes Epic 4 \
                          (Anime Icons), Epic 5 (Kanban Musume Character)."
                .to_string(),
            state: "open".to_string(),
        },
    ]
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn task(
    title: &str,
    background: &str,
    criteria: &str,
    files: &str,
    steps: &str,
    time: &str,
    priority: &str,
    size: &str,
    branch: &str,
    commit: &str,
    labels: &[&str],
) -> TaskSpec {
    TaskSpec {
        title: title.to_string(),
        background: background.to_string(),
        acceptance_criteria: criteria.to_string(),
        files: files.to_string(),
        steps: steps.to_string(),
        estimated_time: time.to_string(),
        code: String::new(),
        testing: "- Verify the change renders correctly in the browser\n- Check accessibility contrast where applicable".to_string(),
        priority: priority.to_string(),
        size: size.to_string(),
        blocked_by: None,
        blocks: None,
        branch: branch.to_string(),
        commit: commit.to_string(),
        labels: strs(labels),
    }
}

fn epic1() -> EpicSpec {
    EpicSpec {
        title: "[Epic 1] Cyberpunk Visual Style".to_string(),
        overview: "Implement the full cyberpunk color scheme: dark base tones, neon accents, \
                   gradients, and glow elements."
            .to_string(),
        as_a: "visitor with an anime aesthetic".to_string(),
        i_want: "a deep-blue, purple, and neon color scheme".to_string(),
        so_that: "the interface reflects my taste instead of a generic business style".to_string(),
        acceptance_criteria: "- [ ] Primary palette uses deep blue (#0a0e27), purple (#6366f1), neon pink (#ec4899), neon cyan (#06b6d4)\n\
                              - [ ] Backgrounds stay dark; no harsh bright surfaces\n\
                              - [ ] Text and icons use high-contrast neon tones and remain readable\n\
                              - [ ] Dark mode (default) and light mode are both supported\n\
                              - [ ] Mobile keeps the same palette"
            .to_string(),
        success_metrics: "- All pages use the new cyberpunk color scheme\n\
                          - Theme toggle works smoothly\n\
                          - Contrast ratios meet WCAG AA\n\
                          - Mobile and desktop styling is consistent"
            .to_string(),
        dependencies: "None - This is a foundational epic".to_string(),
        milestone: PHASE_1.to_string(),
        labels: strs(&["epic", "phase-1", "ui", "design", "priority-p0"]),
        tasks: vec![
            {
                let mut t = task(
                    "[Epic 1-Task 1] Setup Tailwind CSS cyberpunk color palette",
                    "Define the cyberpunk color system in the Tailwind config: deep blue, purple, neon pink, and neon cyan theme colors.",
                    "- [ ] Custom colors added to tailwind.config.js\n- [ ] CSS variables defined for dynamic theme switching\n- [ ] Color names are clear and semantic\n- [ ] All required shade variants (50-950) included",
                    "- `tailwind.config.js`\n- `src/app/globals.css`",
                    "1. Add color definitions under theme.extend.colors\n2. Define CSS variables in globals.css\n3. Verify colors across components",
                    "2 hours",
                    "P0",
                    "size-small",
                    "feat/epic1-task1-tailwind-colors",
                    "feat: Add cyberpunk color palette to Tailwind config",
                    &["feature", "phase-1", "ui", "design", "priority-p0", "size-small"],
                );
                t.code = "// tailwind.config.js\nmodule.exports = {\n  theme: {\n    extend: {\n      colors: {\n        cyber: {\n          dark: '#0a0e27',\n          purple: '#6366f1',\n          pink: '#ec4899',\n          cyan: '#06b6d4'\n        }\n      }\n    }\n  }\n}".to_string();
                t
            },
            {
                let mut t = task(
                    "[Epic 1-Task 2] Create dark theme base styles",
                    "Create the dark theme base styles: deep blue backgrounds and base layout styling.",
                    "- [ ] Page background uses deep blue (#0a0e27)\n- [ ] Text colors have sufficient contrast\n- [ ] All base components pick up the dark theme\n- [ ] No harsh bright surfaces",
                    "- `src/app/globals.css`\n- `src/app/layout.tsx`",
                    "1. Define dark theme base styles in globals.css\n2. Update the body background color\n3. Set default text and link colors",
                    "2 hours",
                    "P0",
                    "size-small",
                    "feat/epic1-task2-dark-theme-base",
                    "feat: Implement dark theme base styles",
                    &["feature", "phase-1", "ui", "design", "priority-p0", "size-small"],
                );
                t.blocked_by = Some("Task 1".to_string());
                t
            },
            {
                let mut t = task(
                    "[Epic 1-Task 3] Implement neon color scheme for text and icons",
                    "Apply the neon palette to text, icons, and emphasis so the visual language is consistent and recognizable.",
                    "- [ ] Text and icons use neon tones\n- [ ] Key information has a clear accent color\n- [ ] Readability and contrast are preserved\n- [ ] Component styles are reusable",
                    "- `src/app/globals.css`\n- `src/components/ui/*.tsx`",
                    "1. Define base neon text/icon classes in globals.css\n2. Replace colors in key components\n3. Verify contrast against both themes",
                    "2 hours",
                    "P0",
                    "size-small",
                    "feat/epic1-task3-neon-colors",
                    "feat: Apply neon color scheme for text and icons",
                    &["feature", "phase-1", "ui", "design", "priority-p0", "size-small"],
                );
                t.blocked_by = Some("Task 1".to_string());
                t
            },
            {
                let mut t = task(
                    "[Epic 1-Task 4] Add glow effects to interactive elements",
                    "Add glow effects to buttons, inputs, and other interactive components to reinforce the cyberpunk feel.",
                    "- [ ] Hover/focus states have a soft glow\n- [ ] Glow is configurable and never hurts readability\n- [ ] No impact on interaction performance",
                    "- `src/components/ui/button.tsx`\n- `src/app/globals.css`",
                    "1. Define shared glow styles in globals.css\n2. Apply to buttons and inputs\n3. Verify visual consistency across states",
                    "3 hours",
                    "P1",
                    "size-medium",
                    "feat/epic1-task4-glow-effects",
                    "feat: Add glow effects to interactive elements",
                    &["feature", "phase-1", "ui", "design", "priority-p1", "size-medium"],
                );
                t.blocked_by = Some("Task 1".to_string());
                t
            },
        ],
    }
}

fn epic2() -> EpicSpec {
    EpicSpec {
        title: "[Epic 2] Dynamic Particle Background".to_string(),
        overview: "Implement a dynamic particle starfield background with performance monitoring, \
                   device degradation, and a mobile strategy that balances immersion and frame rate."
            .to_string(),
        as_a: "visitor".to_string(),
        i_want: "a moving particle starfield behind the page".to_string(),
        so_that: "the interface feels more sci-fi and immersive".to_string(),
        acceptance_criteria: "- [ ] Background contains slowly drifting particles (starfield)\n\
                              - [ ] Particles have gradient transparency and a slight glow\n\
                              - [ ] Lightweight pointer interaction (can be disabled)\n\
                              - [ ] Mobile auto-degrades to a static gradient or low particle count\n\
                              - [ ] Animation holds 30fps or better"
            .to_string(),
        success_metrics: "- Particle background never blocks interaction\n\
                          - FPS >= 30 on mainstream devices\n\
                          - Mobile devices auto-apply the simplified configuration"
            .to_string(),
        dependencies: "None - This epic can be developed in parallel".to_string(),
        milestone: PHASE_1.to_string(),
        labels: strs(&["epic", "phase-1", "ui", "animation", "performance", "priority-p1"]),
        tasks: vec![
            task(
                "[Epic 2-Task 1] Create Canvas-based particle system component",
                "Build the Canvas component that owns the particle system lifecycle: setup, render loop, teardown.",
                "- [ ] Component mounts a full-viewport canvas\n- [ ] Render loop starts and stops with the component\n- [ ] Particle count is configurable",
                "- `src/components/ParticleBackground.tsx`",
                "1. Create the component and canvas ref\n2. Implement the requestAnimationFrame loop\n3. Expose particle count as a prop",
                "3 hours",
                "P1",
                "size-medium",
                "feat/epic2-task1-particle-canvas",
                "feat: Add Canvas-based particle system component",
                &["feature", "phase-1", "ui", "animation", "priority-p1", "size-medium"],
            ),
            task(
                "[Epic 2-Task 2] Implement device detection and auto-degradation",
                "Detect low-power devices and automatically reduce particle count or fall back to a static gradient.",
                "- [ ] Mobile and low-end devices are detected\n- [ ] Degraded configuration applies automatically\n- [ ] Static gradient fallback renders when canvas is disabled",
                "- `src/components/ParticleBackground.tsx`",
                "1. Add device capability detection\n2. Wire degraded particle configuration\n3. Implement the static gradient fallback",
                "3 hours",
                "P1",
                "size-medium",
                "feat/epic2-task2-auto-degradation",
                "feat: Add device detection and particle auto-degradation",
                &["feature", "phase-1", "ui", "performance", "priority-p1", "size-medium"],
            ),
        ],
    }
}

fn epic3() -> EpicSpec {
    EpicSpec {
        title: "[Epic 3] 3D Card Effects".to_string(),
        overview: "Give bookmark cards 3D hover, tilt, and interaction effects for depth and \
                   playfulness while keeping mobile usable."
            .to_string(),
        as_a: "visitor".to_string(),
        i_want: "bookmark cards with 3D hover and tilt effects".to_string(),
        so_that: "interactions feel playful and visually dimensional".to_string(),
        acceptance_criteria: "- [ ] Hover tilts the card in 3D with a floating shadow\n\
                              - [ ] Transitions are smooth and use one animation framework\n\
                              - [ ] Click feedback is clear (scale or highlight)\n\
                              - [ ] Mobile gets simplified animations\n\
                              - [ ] Text and icons stay readable during animation"
            .to_string(),
        success_metrics: "- Hover/tilt feels natural without jitter\n\
                          - Mobile animation stays inside the performance budget\n\
                          - Reduced-motion users can opt out"
            .to_string(),
        dependencies: "None - This epic can be developed independently".to_string(),
        milestone: PHASE_1.to_string(),
        labels: strs(&["epic", "phase-1", "ui", "animation", "priority-p1"]),
        tasks: vec![
            task(
                "[Epic 3-Task 1] Create 3D tilt effect component",
                "Build the tilt wrapper that maps pointer position to a 3D rotation of the card.",
                "- [ ] Pointer position drives rotateX/rotateY\n- [ ] Tilt resets smoothly on pointer leave\n- [ ] Effect is disabled for reduced-motion users",
                "- `src/components/BookmarkCard.tsx`",
                "1. Track pointer position over the card\n2. Map position to rotation transforms\n3. Respect prefers-reduced-motion",
                "3 hours",
                "P1",
                "size-medium",
                "feat/epic3-task1-tilt-component",
                "feat: Add 3D tilt effect component",
                &["feature", "phase-1", "ui", "animation", "priority-p1", "size-medium"],
            ),
            task(
                "[Epic 3-Task 2] Implement hover shadow and glow border",
                "Add the floating shadow and neon border glow that accompany the tilt on hover.",
                "- [ ] Hover raises the card with a soft shadow\n- [ ] Border glow matches the neon palette\n- [ ] No layout shift on hover",
                "- `src/components/BookmarkCard.tsx`\n- `src/app/globals.css`",
                "1. Define shadow and glow styles\n2. Apply on hover alongside the tilt\n3. Verify there is no layout shift",
                "2 hours",
                "P2",
                "size-small",
                "feat/epic3-task2-hover-glow",
                "feat: Add hover shadow and glow border to cards",
                &["feature", "phase-1", "ui", "design", "priority-p2", "size-small"],
            ),
        ],
    }
}

fn epic4() -> EpicSpec {
    EpicSpec {
        title: "[Epic 4] Anime Icons".to_string(),
        overview: "Introduce hand-drawn style icons and illustrations, establishing an anime \
                   visual language with a reusable icon system and style guide."
            .to_string(),
        as_a: "visitor".to_string(),
        i_want: "hand-drawn icons and decorative illustration elements".to_string(),
        so_that: "the interface has a stronger anime atmosphere".to_string(),
        acceptance_criteria: "- [ ] Core category icons share a consistent hand-drawn style\n\
                              - [ ] Empty and loading states have illustrations\n\
                              - [ ] Icons are componentized and reusable with hover animation\n\
                              - [ ] SVG sizes stay small with acceptable load performance\n\
                              - [ ] Illustrations keep their proportions across screens"
            .to_string(),
        success_metrics: "- Icons and illustrations look consistent across pages\n\
                          - SVGs are optimized and load quickly\n\
                          - The style guide can onboard new contributors"
            .to_string(),
        dependencies: "None - Can proceed after Phase 1 or in parallel".to_string(),
        milestone: PHASE_2.to_string(),
        labels: strs(&["epic", "phase-2", "ui", "design", "priority-p2"]),
        tasks: vec![
            task(
                "[Epic 4-Task 1] Implement icon component system",
                "Wrap the hand-drawn SVG set in a reusable icon component with size and color props.",
                "- [ ] One component renders any icon by name\n- [ ] Size and color are props\n- [ ] Icons inherit the neon palette by default",
                "- `src/components/ui/Icon.tsx`",
                "1. Define the icon registry\n2. Implement the Icon component\n3. Replace inline SVGs with the component",
                "2 hours",
                "P2",
                "size-small",
                "feat/epic4-task1-icon-system",
                "feat: Add reusable icon component system",
                &["feature", "phase-2", "ui", "design", "priority-p2", "size-small"],
            ),
            task(
                "[Epic 4-Task 2] Design empty state illustrations",
                "Add illustrations for empty search results and empty categories.",
                "- [ ] Empty search and empty category states have illustrations\n- [ ] Illustrations scale responsively\n- [ ] Alt text provided for accessibility",
                "- `src/components/EmptyState.tsx`\n- `public/illustrations/`",
                "1. Source or draw the illustrations\n2. Build the EmptyState component\n3. Wire it into search and category views",
                "3 hours",
                "P3",
                "size-medium",
                "feat/epic4-task2-empty-states",
                "feat: Add empty state illustrations",
                &["feature", "phase-2", "ui", "design", "priority-p3", "size-medium"],
            ),
        ],
    }
}

fn epic5() -> EpicSpec {
    EpicSpec {
        title: "[Epic 5] Kanban Musume Character".to_string(),
        overview: "Build an interactive mascot character assistant with dialog, quick actions, \
                   state changes, and mobile adaptation."
            .to_string(),
        as_a: "visitor".to_string(),
        i_want: "an interactive mascot character".to_string(),
        so_that: "the interface is more fun and common actions are quicker to reach".to_string(),
        acceptance_criteria: "- [ ] Mascot is pinned to a page corner and responds to interaction\n\
                              - [ ] Click or hover triggers dialog and state changes\n\
                              - [ ] Quick action menu speeds up common operations\n\
                              - [ ] Mobile layout allows collapsing or shrinking\n\
                              - [ ] Animations and state transitions are smooth"
            .to_string(),
        success_metrics: "- Character interactions feel responsive and non-intrusive\n\
                          - Quick actions reduce clicks for common tasks\n\
                          - Mobile layout remains usable without occlusion"
            .to_string(),
        dependencies: "None - Can proceed after Phase 2 starts".to_string(),
        milestone: PHASE_2.to_string(),
        labels: strs(&["epic", "phase-2", "ui", "animation", "priority-p2"]),
        tasks: vec![
            task(
                "[Epic 5-Task 1] Create mascot component with fixed positioning",
                "Build the mascot component pinned to the page corner with entrance animation.",
                "- [ ] Component stays fixed in the corner across pages\n- [ ] Entrance animation plays on first load\n- [ ] Position avoids occluding page content",
                "- `src/components/KanbanMusume.tsx`",
                "1. Build the fixed-position component shell\n2. Add the entrance animation\n3. Verify placement across pages",
                "2 hours",
                "P2",
                "size-small",
                "feat/epic5-task1-mascot-component",
                "feat: Add mascot component with fixed positioning",
                &["feature", "phase-2", "ui", "animation", "priority-p2", "size-small"],
            ),
            task(
                "[Epic 5-Task 2] Implement click interaction and dialog system",
                "Add the dialog bubble and click-driven interaction states to the mascot.",
                "- [ ] Clicking the mascot opens a dialog bubble\n- [ ] Time-based greeting messages rotate\n- [ ] Dialog dismisses on outside click",
                "- `src/components/KanbanMusume.tsx`",
                "1. Implement the dialog bubble\n2. Add greeting message rotation\n3. Handle outside-click dismissal",
                "3 hours",
                "P2",
                "size-medium",
                "feat/epic5-task2-dialog-system",
                "feat: Add mascot click interaction and dialog system",
                &["feature", "phase-2", "ui", "animation", "priority-p2", "size-medium"],
            ),
        ],
    }
}
