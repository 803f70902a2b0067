//! Vocabulary: the fixed lookup tables behind extraction, domain detection and
//! role-based gap analysis.
//!
//! Built once at startup (built-in tables or a JSON file) and shared read-only
//! through `AppState` as `Arc<Vocabulary>`. Every pattern is normalized here so the
//! request path never re-normalizes table data.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::domain::Domain;
use crate::matching::extractor::{normalize_skill, normalize_text};

// ────────────────────────────────────────────────────────────────────────────
// Built-in tables
// ────────────────────────────────────────────────────────────────────────────

const BUILTIN_SKILLS: &[&str] = &[
    // Programming
    "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust", "kotlin",
    "sql", "nosql", "mongodb", "postgresql", "mysql", "redis", "dynamodb", "elasticsearch",
    // Web & Mobile
    "react", "angular", "vue", "flutter", "swift", "react native",
    "html", "css", "node.js", "express", "django", "flask", "fastapi", "spring boot",
    "rest api", "graphql", "websocket",
    // Cloud & DevOps
    "aws", "azure", "gcp", "google cloud", "heroku", "docker", "kubernetes", "k8s",
    "terraform", "ansible", "jenkins", "github actions", "gitlab ci", "circleci",
    "ci/cd", "devops", "iac", "infrastructure as code",
    // Data & ML
    "machine learning", "deep learning", "nlp", "cv", "computer vision", "ai",
    "tensorflow", "pytorch", "scikit-learn", "sklearn", "xgboost", "lightgbm",
    "pandas", "numpy", "scipy", "matplotlib", "plotly", "seaborn",
    "spark", "hadoop", "hive", "bigquery", "snowflake", "redshift",
    // Tools & Platforms
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "slack", "asana",
    "postman", "swagger", "openapi", "junit", "pytest", "jest",
    // Databases
    "oracle", "mssql", "cassandra", "solr", "firestore", "cosmos db",
    // Systems & Networking
    "linux", "unix", "windows", "bash", "shell", "powershell",
    "vpn", "firewall", "nat", "ssl", "tls", "https",
    "load balancing", "nginx", "apache", "tomcat", "jetty",
    // Testing
    "selenium", "cypress", "playwright", "appium", "mocha", "chai",
    "testng", "nose", "behave", "cucumber",
    // Architecture & Process
    "microservices", "api", "rest", "soap", "grpc", "message queue", "rabbit",
    "kafka", "sagas", "event driven", "cqrs", "event sourcing",
    "design patterns", "solid", "ddd", "clean code", "refactoring",
    "agile", "scrum", "kanban", "sprint", "waterfall", "tdd", "bdd",
    // Engineering
    "circuit", "pcb", "analog", "digital", "embedded", "firmware", "microcontroller",
    "cad", "solidworks", "autocad", "fusion 360", "creo", "catia",
    "thermodynamics", "hydraulic", "pneumatic", "mechanical", "manufacturing",
    "vlsi", "verilog", "vhdl", "systemverilog", "semiconductor", "ic design",
    // Data Engineering
    "etl", "elt", "data pipeline", "data warehouse", "data lake", "data mesh",
    "airflow", "dagster", "prefect", "dbt", "fivetran", "stitch",
    "apache spark", "mapreduce", "flink", "stream processing",
    // Cloud Services
    "lambda", "serverless", "functions", "containers", "ecs", "eks", "aks",
    "app service", "virtual machine", "compute", "storage", "networking",
    "database as a service", "managed database", "paas", "iaas", "saas",
    // Soft skills
    "leadership", "communication", "teamwork", "problem solving",
    "project management", "scrum master", "product owner",
];

const COMPUTER_SCIENCE_KEYWORDS: &[&str] = &[
    "python", "sql", "algorithm", "software", "api", "docker", "backend", "frontend",
    "javascript", "typescript", "react", "angular", "nodejs",
];

const ELECTRICAL_ENGINEERING_KEYWORDS: &[&str] = &[
    "circuit", "pcb", "analog", "digital", "embedded", "vlsi", "semiconductor",
    "microcontroller", "firmware",
];

const MECHANICAL_ENGINEERING_KEYWORDS: &[&str] = &[
    "cad", "solidworks", "thermodynamics", "manufacturing", "hydraulic", "pneumatic",
    "mechanics", "creo", "fusion",
];

const DATA_SCIENCE_KEYWORDS: &[&str] = &[
    "machine learning", "deep learning", "nlp", "statistics", "pandas", "tensorflow",
    "pytorch", "sklearn", "data mining", "analytics",
];

const DEVOPS_KEYWORDS: &[&str] = &[
    "kubernetes", "docker", "terraform", "aws", "azure", "gcp", "ci/cd", "jenkins",
    "ansible", "infrastructure", "cloud",
];

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    (
        "Machine Learning Engineer",
        &["Python", "ML", "PyTorch", "Statistics", "TensorFlow", "Deep Learning", "Algorithms"],
    ),
    (
        "Data Analyst",
        &["Excel", "SQL", "Python", "Tableau", "Power BI", "R", "Statistics"],
    ),
    (
        "Backend Engineer",
        &["Python", "SQL", "Docker", "REST API", "Kubernetes", "Microservices", "Database Design"],
    ),
    (
        "Frontend Engineer",
        &["JavaScript", "React", "CSS", "TypeScript", "Redux", "Testing", "HTML"],
    ),
    (
        "DevOps Engineer",
        &["Docker", "Kubernetes", "Terraform", "AWS", "CI/CD", "Linux", "Ansible"],
    ),
    (
        "Data Engineer",
        &["SQL", "Spark", "Python", "Airflow", "Kafka", "Data Warehouse", "ETL"],
    ),
    (
        "Cloud Architect",
        &["AWS", "Azure", "GCP", "Terraform", "Networking", "Security", "Infrastructure"],
    ),
    (
        "Full Stack Developer",
        &["JavaScript", "React", "Python", "Docker", "SQL", "REST API", "Testing"],
    ),
    (
        "QA Engineer",
        &["Testing", "Selenium", "Pytest", "JIRA", "Automation", "SQL", "API Testing"],
    ),
    (
        "Security Engineer",
        &["Linux", "Networking", "Cryptography", "Penetration Testing", "Security", "Python", "Firewalls"],
    ),
];

/// Substituted when a job yields no requirements or a target role is not in the catalog.
const DEFAULT_SKILLS: &[&str] = &["Communication", "Problem Solving", "Teamwork"];

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A recognizable skill: `name` is reported back to callers, `pattern` is what gets
/// searched for inside normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub name: String,
    pub pattern: String,
}

/// A target role and the skills it requires, in display casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub title: String,
    pub skills: Vec<String>,
}

/// On-disk vocabulary layout, read from `SKILL_VOCABULARY_PATH`.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularySource {
    pub skills: Vec<String>,
    pub domains: BTreeMap<Domain, Vec<String>>,
    #[serde(default)]
    pub roles: Vec<RoleProfile>,
    #[serde(default = "default_skill_list")]
    pub default_skills: Vec<String>,
}

fn default_skill_list() -> Vec<String> {
    DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Immutable lookup tables, normalized at construction.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    skills: Vec<VocabularyEntry>,
    domains: BTreeMap<Domain, Vec<String>>,
    roles: Vec<RoleProfile>,
    default_skills: Vec<String>,
}

impl Vocabulary {
    /// The tables compiled into the binary.
    pub fn builtin() -> Self {
        let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let domains = BTreeMap::from([
            (Domain::ComputerScience, to_vec(COMPUTER_SCIENCE_KEYWORDS)),
            (
                Domain::ElectricalEngineering,
                to_vec(ELECTRICAL_ENGINEERING_KEYWORDS),
            ),
            (
                Domain::MechanicalEngineering,
                to_vec(MECHANICAL_ENGINEERING_KEYWORDS),
            ),
            (Domain::DataScience, to_vec(DATA_SCIENCE_KEYWORDS)),
            (Domain::DevOps, to_vec(DEVOPS_KEYWORDS)),
        ]);

        let roles = BUILTIN_ROLES
            .iter()
            .map(|(title, skills)| RoleProfile {
                title: title.to_string(),
                skills: to_vec(skills),
            })
            .collect();

        Self::from_source(VocabularySource {
            skills: to_vec(BUILTIN_SKILLS),
            domains,
            roles,
            default_skills: default_skill_list(),
        })
    }

    /// Loads and normalizes a JSON vocabulary file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        let source: VocabularySource = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))?;

        if source.skills.is_empty() {
            anyhow::bail!("Vocabulary file {} lists no skills", path.display());
        }
        if source.default_skills.is_empty() {
            anyhow::bail!("Vocabulary file {} has an empty default_skills list", path.display());
        }

        Ok(Self::from_source(source))
    }

    /// Normalizes and de-duplicates a source table set.
    pub fn from_source(source: VocabularySource) -> Self {
        let mut skills: Vec<VocabularyEntry> = Vec::with_capacity(source.skills.len());
        for raw in &source.skills {
            let name = normalize_skill(raw);
            let pattern = normalize_text(raw);
            if name.is_empty() || pattern.is_empty() || skills.iter().any(|e| e.name == name) {
                continue;
            }
            skills.push(VocabularyEntry { name, pattern });
        }

        let domains = source
            .domains
            .into_iter()
            .map(|(domain, keywords)| {
                let mut patterns: Vec<String> = Vec::with_capacity(keywords.len());
                for keyword in keywords {
                    let pattern = normalize_text(&keyword);
                    if !pattern.is_empty() && !patterns.contains(&pattern) {
                        patterns.push(pattern);
                    }
                }
                (domain, patterns)
            })
            .collect();

        Self {
            skills,
            domains,
            roles: source.roles,
            default_skills: source.default_skills,
        }
    }

    pub fn skills(&self) -> &[VocabularyEntry] {
        &self.skills
    }

    /// Normalized keyword patterns per domain.
    pub fn domain_keywords(&self) -> &BTreeMap<Domain, Vec<String>> {
        &self.domains
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    /// Fallback requirement set, in display casing.
    pub fn default_skills(&self) -> &[String] {
        &self.default_skills
    }

    /// Catalog lookup by title, ignoring case and surrounding whitespace.
    pub fn role(&self, title: &str) -> Option<&RoleProfile> {
        let wanted = normalize_skill(title);
        self.roles.iter().find(|r| normalize_skill(&r.title) == wanted)
    }

    /// Required skills for `title`, or the default set for roles outside the catalog.
    pub fn required_skills_for(&self, title: &str) -> &[String] {
        self.role(title)
            .map(|r| r.skills.as_slice())
            .unwrap_or(&self.default_skills)
    }
}
