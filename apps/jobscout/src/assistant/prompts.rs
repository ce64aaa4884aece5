// Prompts for the career assistant. Every builder takes already-truncated text.

pub const ANALYSIS_SYSTEM: &str =
    "You are a career advisor analyzing job postings. Provide concise, actionable insights.";
pub const RESUME_SYSTEM: &str =
    "You are a resume expert helping candidates tailor their resume for specific jobs.";
pub const COVER_LETTER_SYSTEM: &str =
    "You are a career advisor helping candidates write compelling cover letters.";
pub const INTERVIEW_SYSTEM: &str =
    "You are an interview coach preparing candidates for job interviews.";
pub const INSIGHTS_SYSTEM: &str =
    "You are a career analyst providing insights on job market trends.";

pub const ANALYSIS_MAX_TOKENS: u32 = 700;
pub const RESUME_MAX_TOKENS: u32 = 600;
pub const COVER_LETTER_MAX_TOKENS: u32 = 600;
pub const INTERVIEW_MAX_TOKENS: u32 = 800;
pub const INSIGHTS_MAX_TOKENS: u32 = 800;

pub fn analysis_prompt(title: &str, company: &str, description: &str) -> String {
    format!(
        "Analyze this job posting and provide:
1. Key responsibilities (3-5 bullet points)
2. Required skills and qualifications
3. Nice-to-have skills
4. Company culture indicators
5. Red flags or concerns (if any)

Job Title: {title}
Company: {company}
Description: {description}

Provide the analysis in a structured format."
    )
}

pub fn resume_tips_prompt(title: &str, description: &str, user_skills: &[String]) -> String {
    let skills_context = if user_skills.is_empty() {
        String::new()
    } else {
        format!("\n\nCandidate's skills: {}", user_skills.join(", "))
    };

    format!(
        "Based on this job posting, provide 5-7 specific tips on how to tailor a resume:

Job Title: {title}
Description: {description}{skills_context}

Focus on:
- Keywords to include
- Skills to emphasize
- Experience to highlight
- How to frame achievements"
    )
}

pub fn cover_letter_prompt(title: &str, company: &str, description: &str) -> String {
    format!(
        "Create a cover letter outline for this position:

Job Title: {title}
Company: {company}
Description: {description}

Provide:
1. Opening paragraph approach
2. Key points to address (3-4)
3. How to demonstrate fit
4. Closing paragraph approach"
    )
}

pub fn interview_prep_prompt(title: &str, company: &str, description: &str) -> String {
    format!(
        "Provide interview preparation guidance for this role:

Job Title: {title}
Company: {company}
Description: {description}

Include:
1. Likely interview questions (5-7)
2. Technical topics to review
3. Company research suggestions
4. Questions to ask the interviewer"
    )
}

pub fn career_insights_prompt(titles: &[&str], companies: &[&str]) -> String {
    format!(
        "Based on these job listings, provide career insights:

Job Titles: {}
Companies hiring: {}

Analyze:
1. Common skill requirements
2. Market trends
3. Career growth opportunities
4. Salary expectations (if inferable)
5. Recommendations for job seekers",
        titles.join(", "),
        companies.join(", ")
    )
}
