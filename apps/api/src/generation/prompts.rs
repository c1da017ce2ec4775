// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for résumé tailoring — constrains the output to the plain
/// text conventions the tailored-text parser accepts.
pub const TAILOR_SYSTEM: &str = "You are a professional resume writer and ATS \
    optimisation expert. You rewrite resumes for specific job descriptions \
    without inventing anything. Output plain text only, exactly in the \
    requested format. No notes, no disclaimers, no meta commentary.";

/// Tailoring prompt template.
/// Replace: {no_fabrication}, {allowed_sections}, {job_text}, {resume_text}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"{no_fabrication}

Update the resume below so it is tailored specifically to the job description.

Strict rules (must follow):
- DO NOT claim anything that is not already written in the resume.
- You may only rewrite, restructure, reword, reorder, and remove content based on what already exists.
- If something is not relevant to the job description, remove it completely.
- If something is important but buried, move it higher and make it more visible.
- Improve bullet points to sound more achievement-based, keeping the same meaning and information.
- Optimise for ATS keyword matching using wording from the job description, but only where it truthfully matches existing experience.

Formatting constraints:
- Output plain text only.
- Start your response with a single line: 'TAGLINE: <short role-specific tagline>'.
- Use section headers starting with '## ' and ONLY these exact section titles:
{allowed_sections}
- Use entry headers starting with '### ', with fields separated by ' | ' (title, organisation, date last).
- Use bullet lines starting with '- '.
- Do not include name/contact at the top.
- Do not include separators like '---'.

Job description:
{job_text}

Current resume:
{resume_text}"#;

/// System prompt for tagline generation.
pub const TAGLINE_SYSTEM: &str = "You write very short, role-specific resume \
    taglines. Return a single line only, no quotes, no extra text.";

/// Tagline prompt template. Replace: {job_text}, {resume_text}
pub const TAGLINE_PROMPT_TEMPLATE: &str = r#"Create a very short, role-specific resume tagline based on the job description and the resume.
Use 3 to 6 words maximum. Avoid separators like '|'.
STRICT RULE: Use only roles/skills/terms that already appear in the resume text. Do NOT invent or add new tools, skills, or roles.

Job description:
{job_text}

Resume:
{resume_text}"#;

/// System prompt for cover letter drafting.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional cover letter \
    writer and recruitment specialist. Return plain text only. Do not \
    include a subject line.";

/// Cover letter prompt template. Replace: {name}, {job_text}, {resume_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a highly tailored cover letter for this specific role.

Strict rules (must follow):
- DO NOT invent or exaggerate experience, achievements, or skills.
- DO NOT add fake metrics, fake projects, or fake responsibilities.
- Only use information that already exists in the resume. If something is not in the resume, do not mention it.
- You may reword and present experience in a stronger way, but the meaning must stay truthful.
- Use keywords and language from the job description where relevant, but only when it matches actual experience.

Cover letter requirements:
- Tone must be confident, professional, and modern (not generic or robotic).
- It must sound like a real person wrote it, not AI.
- Keep it concise: 300-450 words max.
- Strong opening paragraph (role + excitement + value), middle paragraph(s) linking skills/projects to the job requirements, closing paragraph with enthusiasm and a call to action.

Formatting rules:
- Use Australian/UK spelling.
- Avoid outdated wording such as "To whom it may concern".
- Address the company by name; if the company name is not present in the job description, use "Dear Hiring Manager".
- End with:
Kind regards,

{name}

Job description:
{job_text}

Resume:
{resume_text}"#;

/// System prompt for fit assessment — enforces JSON-only output.
pub const FIT_SYSTEM: &str = "You are a pragmatic recruitment analyst. \
    Assess whether a candidate should apply for a role based only on their \
    resume. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Fit assessment prompt template. Replace: {job_text}, {resume_text}
pub const FIT_PROMPT_TEMPLATE: &str = r#"Assess whether the candidate should apply for this role based only on the resume.

Return a JSON object with this EXACT schema (no extra fields):
{
  "recommendation": "APPLY",
  "confidence": 72,
  "rationale": "One short sentence.",
  "matched_requirements": ["requirement found in both job description and resume"],
  "missing_requirements": ["requirement in the job description not evidenced in the resume"]
}

Rules:
- recommendation: one of APPLY, MAYBE, NO
- confidence: integer 0-100
- rationale: one short sentence
- keep each array item short and specific
- Do not invent resume facts.

Job description:
{job_text}

Resume:
{resume_text}"#;
