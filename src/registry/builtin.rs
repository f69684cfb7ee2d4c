// src/registry/builtin.rs

//! The canned scenario set shipped with the crate.
//!
//! Four scenarios cover the three flow modes: a CV-review form (happy path,
//! the default fallback), a Reddit weekly digest (build failure + retry), a
//! Gmail inbox triage (interruption + resume), and a blank canvas starter
//! (happy path). All content is fabricated; nothing here is ever executed.
//!
//! How to add a scenario:
//! 1. Write a `fn my_scenario() -> Scenario` below (copy `cv_review`).
//! 2. Give it `mentions` and `keywords` for prompt matching.
//! 3. Append it in [`builtin_registry`]; position matters, since keyword
//!    ties resolve to the earliest scenario.

use crate::registry::model::{
    ActivityItem, RawScenario, Scenario, WorkflowField, WorkflowSchema,
};
use crate::registry::ScenarioRegistry;
use crate::types::FileAction;

/// Id of the scenario used when nothing matches a prompt.
pub const DEFAULT_SCENARIO_ID: &str = "cv-review";

/// Build the default registry.
///
/// Infallible: the set below is non-empty by construction, so the registry
/// invariant holds without a runtime check at every call site.
pub fn builtin_registry() -> ScenarioRegistry {
    ScenarioRegistry::new(
        vec![cv_review(), reddit_weekly_summary(), gmail_triage(), blank_canvas()],
        Some(DEFAULT_SCENARIO_ID.to_string()),
    )
    .expect("builtin scenario set is non-empty")
}

fn text(id: &str, text: &str) -> ActivityItem {
    ActivityItem::Text {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn file(id: &str, action: FileAction, path: &str, description: &str) -> ActivityItem {
    ActivityItem::File {
        id: id.to_string(),
        action,
        path: path.to_string(),
        description: description.to_string(),
    }
}

fn done(id: &str, text: &str) -> ActivityItem {
    ActivityItem::Done {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn cv_review() -> Scenario {
    let activity = vec![
        text(
            "intro",
            "Got it. I'll build a CV review experience using @cv_reviewer.\nPlan: 1) scaffold form UI 2) wire fake workflow response 3) connect preview + generation flow.",
        ),
        text("start-work", "Starting implementation now."),
        file(
            "add-form",
            FileAction::Add,
            "components/demo/cv-review-form.tsx",
            "Create interactive CV form with file upload, job description input, loading state, and results.",
        ),
        file(
            "edit-layout",
            FileAction::Edit,
            "components/builder/builder-layout.tsx",
            "Wire mocked generation flow, stage transitions, and chat/preview synchronization.",
        ),
        file(
            "edit-preview",
            FileAction::Edit,
            "components/builder/preview-panel.tsx",
            "Render generated component and keep code output available in the code panel.",
        ),
        text("build-preview", "Building preview and validating interaction states..."),
        done("done", "Done. Your CV review demo is ready in preview."),
    ];

    Scenario::from_raw(RawScenario {
        id: "cv-review".to_string(),
        title: "CV Review Form".to_string(),
        description: "Reviews resumes against a job description and surfaces score, feedback, and suggestions.".to_string(),
        mentions: vec!["cv_reviewer".to_string()],
        keywords: ["cv", "resume", "review", "job description", "candidate"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        flow_mode: Some("happy_path".to_string()),
        activity,
        source_content: CV_REVIEW_SOURCE.to_string(),
        preview: Some("cv-review-form".to_string()),
        workflows: vec![WorkflowSchema {
            id: "cv_reviewer".to_string(),
            name: "CV Reviewer".to_string(),
            description: "Analyzes resumes against job descriptions and provides detailed feedback.".to_string(),
            inputs: vec![
                field("resume", "file", "The resume/CV file to analyze (PDF, DOCX, or TXT)", true),
                field("job_description", "string", "The job description to match against", true),
            ],
            outputs: vec![
                field("score", "number", "Overall match score from 0-100", false),
                field("feedback", "string", "Detailed analysis of strengths and weaknesses", false),
                field("suggestions", "string[]", "Actionable suggestions to improve the resume", false),
            ],
        }],
    })
}

fn reddit_weekly_summary() -> Scenario {
    let activity = vec![
        text(
            "intro",
            "Great use case. I'll create a Reddit-to-Slack insight flow with @reddit_weekly_summary and safe retry handling.",
        ),
        text(
            "schema",
            "Fetching workflow schema and generating input controls for subreddit, range, and Slack channel.",
        ),
        file(
            "add-page",
            FileAction::Add,
            "components/demo/reddit-weekly-summary.tsx",
            "Create weekly summary form with async retry fallback when sync timeout occurs.",
        ),
        file(
            "edit-builder",
            FileAction::Edit,
            "components/builder/builder-layout.tsx",
            "Map this prompt to the build-retry generation mode for unhappy-path preview.",
        ),
        text(
            "timeout",
            "Build check: first sync run exceeded timeout (504). Switching workflow invocation to async polling mode and retrying.",
        ),
        done("done", "Done. Preview now demonstrates timeout recovery and successful completion."),
    ];

    Scenario::from_raw(RawScenario {
        id: "reddit-weekly-summary".to_string(),
        title: "Reddit Weekly Summary".to_string(),
        description: "Summarizes subreddit activity and sends a digest to Slack with retry fallback.".to_string(),
        mentions: vec!["reddit_weekly_summary".to_string()],
        keywords: ["reddit", "slack", "community", "summary", "insights"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        flow_mode: Some("build_retry".to_string()),
        activity,
        source_content: REDDIT_SOURCE.to_string(),
        preview: Some("reddit-weekly-summary".to_string()),
        workflows: vec![WorkflowSchema {
            id: "reddit_weekly_summary".to_string(),
            name: "Reddit Weekly Summary".to_string(),
            description: "Collect posts, summarize themes, and notify Slack.".to_string(),
            inputs: vec![
                field("subreddit", "string", "Subreddit name like r/nextjs.", true),
                field("time_range", "enum", "Time window (24h, 7d, 30d).", true),
                field("slack_channel", "string", "Slack channel for the summary output.", true),
            ],
            outputs: vec![
                field("summary", "string", "Natural-language summary of community themes.", false),
                field("top_topics", "string[]", "Most discussed topics for the selected period.", false),
            ],
        }],
    })
}

fn gmail_triage() -> Scenario {
    let activity = vec![
        text(
            "intro",
            "Perfect. I'll scaffold an inbox triage flow on top of @gmail_ai_labeler with connection state handling.",
        ),
        text(
            "schema",
            "Loaded schema. Creating controls for inbox, dry-run mode, and review queue output.",
        ),
        file(
            "add-ui",
            FileAction::Add,
            "components/demo/gmail-triage-demo.tsx",
            "Create Gmail triage controls and status cards for labels + confidence.",
        ),
        text(
            "interrupt",
            "Stream interrupted while requesting Gmail labels (expired token). Attempting checkpoint resume.",
        ),
        file(
            "edit-flow",
            FileAction::Edit,
            "hooks/use-generation-flow.ts",
            "Add interruption + recovery stages to demonstrate real-world resiliency.",
        ),
        done("done", "Done. Preview now shows interruption recovery and completion after token refresh."),
    ];

    Scenario::from_raw(RawScenario {
        id: "gmail-triage".to_string(),
        title: "Gmail Auto Triage".to_string(),
        description: "Applies AI labels to inbound mail and routes uncertain emails to review.".to_string(),
        mentions: vec!["gmail_ai_labeler".to_string()],
        keywords: ["gmail", "inbox", "support", "labels", "triage", "email"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        flow_mode: Some("interrupt_resume".to_string()),
        activity,
        source_content: GMAIL_SOURCE.to_string(),
        preview: Some("gmail-triage-demo".to_string()),
        workflows: vec![WorkflowSchema {
            id: "gmail_ai_labeler".to_string(),
            name: "Gmail AI Labeler".to_string(),
            description: "Classifies incoming support email threads into labels and priority buckets.".to_string(),
            inputs: vec![
                field("inbox", "string", "Mailbox to monitor.", true),
                field("dry_run", "boolean", "If true, returns proposed labels without writing changes.", true),
            ],
            outputs: vec![
                field("labeled", "number", "Number of threads confidently auto-labeled.", false),
                field("needs_review", "number", "Threads sent to manual review queue.", false),
            ],
        }],
    })
}

fn blank_canvas() -> Scenario {
    let activity = vec![
        text(
            "intro",
            "Starting from a blank template. I will scaffold structure first, then layer components from your prompt.",
        ),
        file(
            "add-page",
            FileAction::Add,
            "app/page.tsx",
            "Create a clean page shell as the starting canvas.",
        ),
        file(
            "add-section",
            FileAction::Add,
            "components/sections/hero.tsx",
            "Add the first reusable section based on the request.",
        ),
        done("done", "Blank template initialized. Ready for next refinements."),
    ];

    Scenario::from_raw(RawScenario {
        id: "blank-canvas".to_string(),
        title: "Blank Canvas".to_string(),
        description: "Starts with a blank template and scaffolds base structure.".to_string(),
        mentions: vec![],
        keywords: ["blank", "from scratch", "start from blank", "starter"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        flow_mode: Some("happy_path".to_string()),
        activity,
        source_content: BLANK_CANVAS_SOURCE.to_string(),
        preview: Some("starter-template".to_string()),
        workflows: vec![],
    })
}

fn field(name: &str, field_type: &str, description: &str, required: bool) -> WorkflowField {
    WorkflowField {
        name: name.to_string(),
        field_type: field_type.to_string(),
        description: description.to_string(),
        required,
    }
}

const CV_REVIEW_SOURCE: &str = r#"'use client'

import { useState } from 'react'

interface ReviewResult {
  score: number
  feedback: string
  suggestions: string[]
}

export function CVReviewForm() {
  const [file, setFile] = useState<File | null>(null)
  const [jobDescription, setJobDescription] = useState('')
  const [isLoading, setIsLoading] = useState(false)
  const [result, setResult] = useState<ReviewResult | null>(null)

  const handleSubmit = async () => {
    if (!file || !jobDescription.trim()) return
    setIsLoading(true)
    await new Promise((r) => setTimeout(r, 2500))
    setResult({
      score: 78,
      feedback: 'Strong technical background with relevant experience...',
      suggestions: [
        'Add more quantifiable achievements',
        'Include relevant keywords from job description',
        'Expand on leadership experience',
      ],
    })
    setIsLoading(false)
  }

  return <button onClick={handleSubmit}>Review CV</button>
}"#;

const REDDIT_SOURCE: &str = r#"'use client'

import { useState } from 'react'

export function RedditWeeklySummaryDemo() {
  const [state, setState] = useState<'idle' | 'running' | 'retrying' | 'done'>('idle')

  const run = async () => {
    setState('running')
    await new Promise((r) => setTimeout(r, 1200))
    setState('retrying')
    await new Promise((r) => setTimeout(r, 1400))
    setState('done')
  }

  return <button onClick={run}>Generate weekly summary</button>
}"#;

const GMAIL_SOURCE: &str = r#"'use client'

import { useState } from 'react'

export function GmailTriageDemo() {
  const [connected, setConnected] = useState(false)
  const [state, setState] = useState<'idle' | 'interrupted' | 'recovering' | 'done'>('idle')

  const run = async () => {
    if (!connected) return
    setState('interrupted')
    await new Promise((r) => setTimeout(r, 1100))
    setState('recovering')
    await new Promise((r) => setTimeout(r, 1300))
    setState('done')
  }

  return <button onClick={run}>Run triage</button>
}"#;

const BLANK_CANVAS_SOURCE: &str = r#"'use client'

export default function Page() {
  return <main className="min-h-screen p-8">Blank canvas</main>
}"#;
