#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use ideaforge::clients::{ClientError, GeneratedImage, ImageGenerator, TextGenerator};

/// Canned outcome for one instruction.
pub enum Script {
    Reply(&'static str),
    Upstream(&'static str),
    RateLimited,
}

/// Text fake keyed by the system instruction, which uniquely identifies
/// the pipeline stage issuing the call. Unscripted instructions get an
/// empty reply, which exercises the parsers' fallback tiers.
#[derive(Default)]
pub struct ScriptedTextClient {
    scripts: HashMap<&'static str, Script>,
}

impl ScriptedTextClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, instruction: &'static str, script: Script) -> Self {
        self.scripts.insert(instruction, script);
        self
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextClient {
    async fn complete(&self, instruction: &str, _prompt: &str) -> Result<String, ClientError> {
        match self.scripts.get(instruction) {
            Some(Script::Reply(reply)) => Ok((*reply).to_string()),
            Some(Script::Upstream(message)) => Err(ClientError::Upstream {
                status: Some(500),
                message: (*message).to_string(),
            }),
            Some(Script::RateLimited) => Err(ClientError::RateLimited {
                message: "429 Too Many Requests".to_string(),
            }),
            None => Ok(String::new()),
        }
    }
}

/// Image fake that renders every prompt to a URL derived from it.
pub struct EchoImageClient;

#[async_trait]
impl ImageGenerator for EchoImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        Ok(GeneratedImage {
            url: format!("https://img.test/{}", prompt.replace(' ', "-")),
            revised_prompt: Some(format!("refined: {prompt}")),
        })
    }
}

/// Image fake that fails any prompt containing the trigger substring and
/// echoes the rest.
pub struct FlakyImageClient {
    pub fail_when_contains: &'static str,
}

#[async_trait]
impl ImageGenerator for FlakyImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        if prompt.contains(self.fail_when_contains) {
            return Err(ClientError::Upstream {
                status: Some(500),
                message: format!("render failed for: {prompt}"),
            });
        }
        EchoImageClient.generate(prompt).await
    }
}
