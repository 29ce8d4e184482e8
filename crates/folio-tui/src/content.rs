//! Portfolio content shown by the panels

/// One page of the skills carousel
#[derive(Debug, Clone, Copy)]
pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [&'static str],
    pub experience: &'static str,
    pub projects: &'static str,
    pub highlight: &'static str,
}

/// One card of the project stack
#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub problem: &'static str,
    pub solution: &'static str,
    pub tech: &'static [&'static str],
    pub impact: &'static str,
}

pub const SKILL_CATEGORIES: [SkillCategory; 4] = [
    SkillCategory {
        title: "AI & Automation",
        skills: &[
            "Azure OpenAI Integration",
            "RAG Systems & Vector DBs",
            "LangChain & Semantic Kernel",
            "Domain-Restricted Chatbots",
            "AI Interview Systems",
            "Speech & Face Analysis",
            "Workflow Automation",
            "API Orchestration",
        ],
        experience: "3+ Years",
        projects: "10+ Production Systems",
        highlight: "Built enterprise RAG chatbots with zero hallucinations",
    },
    SkillCategory {
        title: "Backend & Systems",
        skills: &[
            "Node.js & Python",
            "ASP.NET Core",
            "PostgreSQL & MongoDB",
            "Redis & Caching",
            "REST & GraphQL APIs",
            "Microservices Architecture",
            "Azure Cloud Services",
            "Docker & Containerization",
        ],
        experience: "4+ Years",
        projects: "20+ API Systems",
        highlight: "Optimized queries reducing response time by 60%",
    },
    SkillCategory {
        title: "Product & SaaS",
        skills: &[
            "Full-Stack Development",
            "Product Architecture",
            "Multi-Tenant Systems",
            "Admin Dashboards",
            "Role-Based Access Control",
            "Payment Integration",
            "Analytics & Reporting",
            "SEO & Performance",
        ],
        experience: "3+ Years",
        projects: "8+ SaaS Platforms",
        highlight: "Architected multi-tenant systems serving 1000+ users",
    },
    SkillCategory {
        title: "Frontend & Mobile",
        skills: &[
            "React & Next.js",
            "Flutter (Production Apps)",
            "TypeScript",
            "Tailwind CSS",
            "State Management",
            "Responsive Design",
            "Animation & UX",
            "Progressive Web Apps",
        ],
        experience: "4+ Years",
        projects: "12+ Applications",
        highlight: "Built Flutter apps with 50K+ downloads",
    },
];

pub const CORE_SKILLS: [&str; 8] = [
    "AI System Architecture",
    "RAG & Vector Databases",
    "Full-Stack Development",
    "Cloud Infrastructure (Azure)",
    "API Design & Integration",
    "Database Optimization",
    "Product Strategy",
    "System Scalability",
];

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "JobSpring",
        subtitle: "AI-Powered Hiring & Interview Platform",
        problem: "Traditional hiring is slow, manual, and doesn't scale.",
        solution: "End-to-end AI hiring platform: automated interviews, speech and facial analysis, coding panels and bulk candidate processing.",
        tech: &["Azure OpenAI", "Face Analysis API", "Speech Recognition", "Node.js", "React", "PostgreSQL"],
        impact: "Reduced hiring time by 70%. Processed 1000+ candidates with automated scoring.",
    },
    Project {
        title: "RAG-Based Chatbot",
        subtitle: "Enterprise IPTV Support System",
        problem: "Support teams need accurate, domain-specific answers without hallucination risks.",
        solution: "RAG chatbot on Azure OpenAI embeddings with strict domain restriction and an admin dashboard for content control.",
        tech: &["Azure OpenAI", "Vector Database", "Embeddings", "Admin Dashboard", "Domain Control"],
        impact: "Handles 80% of support queries autonomously with a 95% accuracy rate.",
    },
    Project {
        title: "Google Business Profile SEO Automation",
        subtitle: "Multi-Location SEO Management System",
        problem: "Managing business profiles for many locations by hand doesn't scale.",
        solution: "Scheduled posts, automatic review replies, SEO audits and QR codes for review requests, from one dashboard.",
        tech: &["Google Business API", "Automation Engine", "QR Generation", "Analytics Dashboard"],
        impact: "Automated routine SEO work, 3x review volume, 20+ hours/week saved.",
    },
    Project {
        title: "AI Voice Bot / Call Center System",
        subtitle: "Multilingual Automated Complaint Handling",
        problem: "Civic complaint centers are overwhelmed with repetitive calls.",
        solution: "Voice bot in English, Hindi and Gujarati that detects addresses, ward numbers and issue types, then routes complaints.",
        tech: &["Speech-to-Text", "NLP", "Multi-language Support", "Call Routing", "Database Integration"],
        impact: "Handles 500+ calls/day and cut manual workload by 85%.",
    },
];
