use serde::{Deserialize, Serialize};

use crate::models::Course;

pub const BASE_SYSTEM_PROMPT: &str = "You are an AI Course Assistant helping students with their academic program pathway. \
You provide helpful, accurate information about courses, prerequisites, degree requirements, and academic planning. \
Be concise but informative.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Turno previo de la conversación, tal como lo manda el cliente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Mensaje en el formato de la API de completions
pub type ChatMessage = ChatTurn;

/// Instrucciones base más, si hay curso en contexto, sus campos resueltos
pub fn build_system_prompt(course: Option<&Course>) -> String {
    let mut prompt = BASE_SYSTEM_PROMPT.to_string();
    let Some(course) = course else {
        return prompt;
    };

    prompt.push_str("\n\nCurrent Course Context:");
    prompt.push_str(&format!("\n- Code: {}", course.code));
    prompt.push_str(&format!("\n- Title: {}", course.title));
    prompt.push_str(&format!("\n- Units: {}", course.units));
    prompt.push_str(&format!("\n- Description: {}", course.description.as_deref().unwrap_or("N/A")));
    if let Some(prereqs) = course.prerequisites.as_ref().filter(|p| !p.is_empty()) {
        prompt.push_str(&format!("\n- Prerequisites: {}", prereqs.join(", ")));
    }
    prompt.push_str(&format!("\n- Semester: {}", course.semester));
    prompt
}

/// system + historial + mensaje actual. Turnos `system` del historial se
/// descartan: el único system prompt es el que se construye aquí.
pub fn build_messages(message: &str, history: &[ChatTurn], course: Option<&Course>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatTurn { role: ChatRole::System, content: build_system_prompt(course) });
    messages.extend(history.iter().filter(|t| t.role != ChatRole::System).cloned());
    messages.push(ChatTurn { role: ChatRole::User, content: message.to_string() });
    messages
}
