//! LLM prompt constants for summary generation.
//!
//! The prompt instructs the model to return `{"summary": "..."}` JSON only.
//! Callers deserialize via `llm.call_json::<GeneratedSummary>()`.

pub const SUMMARY_SYSTEM: &str = "\
You are a resume writer. Your task is to write the short professional summary that opens \
a candidate's resume. Write in the third person without pronouns, grounded strictly in the \
facts provided — never invent employers, titles, degrees, or metrics.\n\
\n\
Respond with valid JSON only: {\"summary\": \"...\"}\n\
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = "\
Write a professional summary for the top of a resume.\n\
\n\
CANDIDATE: {name}\n\
CAREER STAGE: {career_stage}\n\
TARGET ROLE: {target_role}\n\
RECENT EXPERIENCE: {experience}\n\
KEY SKILLS: {skills}\n\
\n\
SUMMARY RULES:\n\
1. 2 to 3 sentences, 40 to 70 words total\n\
2. Lead with the candidate's strongest professional identity\n\
3. Mention the target role's domain only if the experience supports it\n\
4. DO NOT invent facts, metrics, employers, or credentials\n\
5. No first-person pronouns, no buzzword chains\n\
\n\
Return JSON only: {\"summary\": \"summary text here\"}";
