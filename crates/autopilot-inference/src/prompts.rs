//! Prompt text for the assistant's chat calls.

use autopilot_core::resume::ParsedProfile;

use crate::endpoint::ChatMessage;

pub const RESUME_PARSER_SYSTEM: &str = "You are a CV parsing assistant. Extract structured data from \
                                         resumes and return only valid JSON.";

pub const COVER_LETTER_SYSTEM: &str = "You are a professional cover letter writer. Create \
                                        compelling, ATS-optimized cover letters.";

/// Upper bound requested from the model; not enforced on the reply.
pub const COVER_LETTER_MAX_WORDS: usize = 300;

pub fn resume_messages(raw_text: &str) -> Vec<ChatMessage> {
  let prompt = format!(
    "Extract structured information from this CV/Resume. Return a JSON object with:
- personalInfo (name, email, phone, location)
- skills (array of strings)
- experience (array with title, company, duration, description)
- education (array with degree, institution, year)

CV Text:
{raw_text}

Return ONLY valid JSON, no additional text."
  );

  vec![ChatMessage::system(RESUME_PARSER_SYSTEM), ChatMessage::user(prompt)]
}

pub fn cover_letter_messages(profile: &ParsedProfile, job_description: &str) -> Vec<ChatMessage> {
  let prompt = format!(
    "Generate a professional cover letter for this job application.

Candidate Background:
- Name: {name}
- Skills: {skills}
- Experience: {experience}

Job Description:
{job_description}

Write a compelling, personalized cover letter (max {COVER_LETTER_MAX_WORDS} words) that \
     highlights relevant experience and skills.",
    name = profile.personal_info.name,
    skills = profile.skills.join(", "),
    experience = profile.experience_summary(),
  );

  vec![ChatMessage::system(COVER_LETTER_SYSTEM), ChatMessage::user(prompt)]
}
