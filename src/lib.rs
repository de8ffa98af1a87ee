//! # Ideaforge: Concurrent Design-Idea Generation
//!
//! Ideaforge fans one design challenge into five concurrent text-generation
//! calls, parses the loosely-formatted replies into typed themed records,
//! renders concept sketches for the visual prompts, and assembles
//! everything into a single [`ideas::GenerationResult`].
//!
//! ## Core Concepts
//!
//! - **Orchestrator**: One invocation per challenge; stateless between calls
//! - **Grammars**: Line-oriented parsers with explicit classification
//!   precedence and never-empty fallback tiers
//! - **Client seams**: `TextGenerator` / `ImageGenerator` traits, with an
//!   OpenAI-compatible implementation built in
//! - **Sessions**: Optional durable storage of a result subset
//!
//! ## Quick Start
//!
//! ```no_run
//! use ideaforge::orchestrator::IdeaOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     ideaforge::telemetry::init();
//!
//!     // Credential resolved from OPENAI_API_KEY (or a .env file).
//!     let orchestrator = IdeaOrchestrator::from_env()?;
//!     let result = orchestrator
//!         .generate("improve the bus stop experience for commuters")
//!         .await?;
//!
//!     for theme in &result.reframes {
//!         println!("{}", theme.name);
//!         for statement in &theme.items {
//!             println!("  - {statement}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! The five text calls join fail-fast: any failure fails the invocation
//! with a [`error::GenerateError`] naming the stage. Image renders are
//! isolated per slot by default, and empty or unparseable replies never
//! error: each grammar falls back to synthetic themes and then to a
//! canonical placeholder set, so a successful result always has content.

pub mod clients;
pub mod concepts;
pub mod config;
pub mod error;
pub mod ideas;
pub mod images;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod telemetry;
