//! Prompt template store: one template per feature.
//!
//! Templates are plain text with `{name}` placeholders filled by
//! [`PromptTemplate::render`].

use std::collections::HashMap;

use crate::template::{render_template, RenderedPrompt};

const CONCEPTS: &str = "\
Act as an AI expert and learning designer. Create 3 innovative concepts on how AI can \
transform workplace learning. Cover: a) adaptive learning, b) simulation-based training, \
and c) behavior-based recommendations. For each concept, give a title and a concise \
explanation. Use a professional, inspiring tone.";

const MICRO_LESSON: &str = "\
Act as a corporate learning instructor with 15+ years of experience in adult education \
and workplace training. Create a concise, practical micro-lesson on the following topic: {topic}.
- Focus on actionable insights, real-world examples, and clear learning objectives.
- Keep the lesson under 300 words.
- Use a friendly, professional tone.
- Format:
1. Lesson Title
2. Objective
3. Lesson Content (with examples)";

const SIMULATION: &str = "\
Act as a senior workplace trainer designing realistic customer service scenarios. \
Create a challenging but fair workplace conversation between an employee and a customer, \
focused on communication, problem-solving, and emotional intelligence. \
Provide the first customer message and three possible employee responses, each reflecting \
a different approach, with feedback on each.
Respond ONLY with valid JSON, no explanations, no markdown, no code blocks. Use this format:
{
  \"customerText\": \"...\",
  \"choices\": [
    {\"text\": \"...\", \"feedback\": \"...\"},
    {\"text\": \"...\", \"feedback\": \"...\"},
    {\"text\": \"...\", \"feedback\": \"...\"}
  ]
}";

const SIMULATION_STEP: &str = "\
Act as a senior workplace trainer running an interactive customer service simulation. \
Play the customer and react realistically to the employee's latest response, then offer \
three possible next employee responses with feedback on each.
Respond ONLY with valid JSON, no explanations, no markdown, no code blocks. Use this format:
{
  \"customerText\": \"...\",
  \"choices\": [
    {\"text\": \"...\", \"feedback\": \"...\"},
    {\"text\": \"...\", \"feedback\": \"...\"},
    {\"text\": \"...\", \"feedback\": \"...\"}
  ]
}
Conversation so far:
{history}
Employee's next response: {user_input}
Continue the scenario.";

const RECOMMENDATION: &str = "\
Act as a professional learning and development advisor. Given the user's identified skill \
gap: '{skill_gap}', recommend a targeted learning activity or resource.
- Explain why this recommendation is effective.
- Suggest a practical first step the user can take.
- Keep your response under 100 words.";

const CAREER_COACH: &str = "\
Act as an experienced career development coach specializing in leadership, soft skills, \
and professional growth. Guide the user through their career challenges by:
- Asking thoughtful, open-ended questions
- Providing actionable advice and encouragement
- Suggesting practical next steps
- Keeping responses empathetic, realistic, and supportive
- Limiting each response to 150 words
If the conversation is just starting, greet the user and ask them to choose a growth area: \
Leadership, Communication, or Conflict Management.";

const SKILLS_FORECAST: &str = "\
Act as a workforce analytics expert specializing in future skills prediction. Given the \
user's learning history and transcript keywords, identify three emerging skills the user \
should develop for career advancement in the next 2-3 years.
- For each skill, briefly explain its importance.
- Use clear, actionable language.
- Format your response as a numbered list.

Learning history: {learning_history}
Transcript keywords: {keywords}";

const VIDEO_QUIZ: &str = "\
You are an AI learning assistant. A user just watched a video. Based on the following \
video summary, generate a quiz.

Summary:
{summary}

Create 3 multiple-choice questions. For each:
- Provide a clear question
- List 4 options (A, B, C, D)
- Indicate the correct answer
- Add a brief explanation for the correct answer

Respond ONLY with a JSON array in this format:
[
  {
    \"question\": \"...\",
    \"options\": [\"A\", \"B\", \"C\", \"D\"],
    \"answer\": \"B\",
    \"explanation\": \"...\"
  }
]";

const CERTIFICATION_RECOMMENDATION: &str = "\
You are an expert certification advisor for IT professionals. Based on the user's role, \
skills, and career goals, recommend certifications that will improve their marketability \
and career growth.

User Profile:
- Role: {role}
- Current Skills: {skills}
- Career Goals: {goals}
- Experience Level: {experience_level}

Provide:
1. 3-5 relevant certifications with brief explanations
2. Why each certification fits the profile
3. Expected time commitment and difficulty level
4. Estimated cost and ROI
5. Next steps to get started

Format the response in a clear, structured way.";

const CERTIFICATION_STUDY_PLAN: &str = "\
You are an expert certification trainer. Create a personalized study plan for the \
{certification_name} certification.

User Profile:
- Current Skills: {current_skills}
- Available Study Time: {study_time} hours per week
- Target Completion Date: {target_date}

Include:
1. Weekly breakdown with specific topics
2. Recommended resources and materials
3. Practice exercises and mock exams
4. Milestones and checkpoints
5. Tips for exam preparation

Keep the plan realistic for the available time.";

const CERTIFICATION_SIMULATION: &str = "\
You are conducting a certification interview simulation for {certification_name}.

Create a realistic interview that tests the candidate on:
- Technical concepts
- Real-world scenarios
- Problem-solving approaches
- Best practices

Provide:
1. 3-5 challenging interview questions
2. Expected answers and explanations
3. Follow-up questions
4. Tips for improvement";

const CERTIFICATION_CAREER_COACH: &str = "\
You are an AI career coach helping a professional plan their certification journey.

User Context:
- Current Role: {role}
- Career Goals: {goals}
- Skills: {skills}

Cover:
1. Why certifications matter for their career path
2. Which certifications align with their goals
3. How to balance work and certification study
4. Long-term career planning with certifications
5. ROI and market value of different certifications

Be motivational and practical.";

const INTENT_CLASSIFICATION: &str = "\
You route requests inside a workplace-learning application. The available modules are:
{modules}

Classify the user's request below. Respond ONLY with valid JSON, no markdown, in this format:
{
  \"intent\": \"short description of what the user wants\",
  \"module_match\": \"one module name from the list, or null if none fits\",
  \"new_feature\": \"a short feature idea if no module fits, otherwise null\",
  \"confidence\": \"High, Medium or Low\",
  \"follow_up_question\": \"a clarifying question if confidence is not High, otherwise null\"
}

User request: {query}";

const TEAM_ANALYTICS: &str = "\
Act as an organizational psychologist analysing team dynamics.

Team: {team_name}
Description: {team_description}
Members:
{members}

Assess the team on these metrics: {metrics}.
Respond ONLY with valid JSON, no markdown, in this format:
{
  \"scores\": {\"metric name\": 0},
  \"strengths\": [\"...\"],
  \"risks\": [\"...\"],
  \"recommendations\": [\"...\"],
  \"summary\": \"...\"
}
Scores are integers from 0 to 100.";

/// Every prompt the application sends to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    Concepts,
    MicroLesson,
    Simulation,
    SimulationStep,
    Recommendation,
    CareerCoach,
    SkillsForecast,
    VideoQuiz,
    CertificationRecommendation,
    CertificationStudyPlan,
    CertificationSimulation,
    CertificationCareerCoach,
    IntentClassification,
    TeamAnalytics,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 14] = [
        PromptTemplate::Concepts,
        PromptTemplate::MicroLesson,
        PromptTemplate::Simulation,
        PromptTemplate::SimulationStep,
        PromptTemplate::Recommendation,
        PromptTemplate::CareerCoach,
        PromptTemplate::SkillsForecast,
        PromptTemplate::VideoQuiz,
        PromptTemplate::CertificationRecommendation,
        PromptTemplate::CertificationStudyPlan,
        PromptTemplate::CertificationSimulation,
        PromptTemplate::CertificationCareerCoach,
        PromptTemplate::IntentClassification,
        PromptTemplate::TeamAnalytics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PromptTemplate::Concepts => "concepts",
            PromptTemplate::MicroLesson => "micro_lesson",
            PromptTemplate::Simulation => "simulation",
            PromptTemplate::SimulationStep => "simulation_step",
            PromptTemplate::Recommendation => "recommendation",
            PromptTemplate::CareerCoach => "career_coach",
            PromptTemplate::SkillsForecast => "skills_forecast",
            PromptTemplate::VideoQuiz => "video_quiz",
            PromptTemplate::CertificationRecommendation => "certification_recommendation",
            PromptTemplate::CertificationStudyPlan => "certification_study_plan",
            PromptTemplate::CertificationSimulation => "certification_simulation",
            PromptTemplate::CertificationCareerCoach => "certification_career_coach",
            PromptTemplate::IntentClassification => "intent_classification",
            PromptTemplate::TeamAnalytics => "team_analytics",
        }
    }

    /// Look a template up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn text(self) -> &'static str {
        match self {
            PromptTemplate::Concepts => CONCEPTS,
            PromptTemplate::MicroLesson => MICRO_LESSON,
            PromptTemplate::Simulation => SIMULATION,
            PromptTemplate::SimulationStep => SIMULATION_STEP,
            PromptTemplate::Recommendation => RECOMMENDATION,
            PromptTemplate::CareerCoach => CAREER_COACH,
            PromptTemplate::SkillsForecast => SKILLS_FORECAST,
            PromptTemplate::VideoQuiz => VIDEO_QUIZ,
            PromptTemplate::CertificationRecommendation => CERTIFICATION_RECOMMENDATION,
            PromptTemplate::CertificationStudyPlan => CERTIFICATION_STUDY_PLAN,
            PromptTemplate::CertificationSimulation => CERTIFICATION_SIMULATION,
            PromptTemplate::CertificationCareerCoach => CERTIFICATION_CAREER_COACH,
            PromptTemplate::IntentClassification => INTENT_CLASSIFICATION,
            PromptTemplate::TeamAnalytics => TEAM_ANALYTICS,
        }
    }

    /// Fill the template's placeholders from `vars`.
    pub fn render(self, vars: &[(&str, &str)]) -> RenderedPrompt {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        render_template(self.text(), &map)
    }
}
