//! Section templates: the unit a README is composed from.
//!
//! A template is a slug (stable identity), a display name, and a markdown
//! body. The built-in set covers the sections most READMEs want; users add
//! their own from a templates directory or create ad-hoc "custom" sections
//! at runtime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_SLUG_LEN: usize = 80;

/// Slugs selected when no session exists yet
pub const DEFAULT_SELECTED: &[&str] = &["title-and-description"];

/// Placeholder body for a freshly created custom section
pub const CUSTOM_BODY: &str = "## Custom\n\n";

/// One reusable README section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTemplate {
    /// Stable identifier, unique within a catalog
    pub slug: String,
    /// Human-readable name shown in lists
    pub name: String,
    /// Markdown body contributed to the composed document
    pub markdown: String,
}

impl SectionTemplate {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            markdown: markdown.into(),
        }
    }

    /// A fresh ad-hoc section. The uuid keeps slugs collision-free across
    /// sessions, machines, and fast repeated creation.
    pub fn custom() -> Self {
        Self {
            slug: format!("custom-{}", Uuid::new_v4().simple()),
            name: "Custom".to_string(),
            markdown: CUSTOM_BODY.to_string(),
        }
    }

    /// True for sections created with [`SectionTemplate::custom`]
    pub fn is_custom(&self) -> bool {
        self.slug.starts_with("custom-")
    }
}

pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut last_was_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if ch.is_ascii() {
            if !slug.is_empty() && !last_was_dash {
                slug.push('-');
                last_was_dash = true;
            }
        }
        // Non-ASCII characters are skipped entirely.
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// "environment-variables" -> "Environment Variables"
pub fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The stock template set. Order here is the catalog's insertion order,
/// which `available` lists inherit before display sorting.
pub fn builtin_templates() -> Vec<SectionTemplate> {
    vec![
        SectionTemplate::new(
            "title-and-description",
            "Title and Description",
            "# Project Title\n\nA brief description of what this project does and who it's for\n",
        ),
        SectionTemplate::new(
            "badges",
            "Badges",
            "## Badges\n\nAdd badges from somewhere like [shields.io](https://shields.io/)\n\n\
             [![MIT License](https://img.shields.io/badge/License-MIT-green.svg)](https://choosealicense.com/licenses/mit/)\n\
             [![GPLv3 License](https://img.shields.io/badge/License-GPL%20v3-yellow.svg)](https://opensource.org/licenses/)\n",
        ),
        SectionTemplate::new(
            "features",
            "Features",
            "## Features\n\n- Light/dark mode toggle\n- Live previews\n- Fullscreen mode\n- Cross platform\n",
        ),
        SectionTemplate::new(
            "demo",
            "Demo",
            "## Demo\n\nInsert gif or link to demo\n",
        ),
        SectionTemplate::new(
            "screenshots",
            "Screenshots",
            "## Screenshots\n\n![App Screenshot](https://via.placeholder.com/468x300?text=App+Screenshot+Here)\n",
        ),
        SectionTemplate::new(
            "tech-stack",
            "Tech Stack",
            "## Tech Stack\n\n**Client:** React, TailwindCSS\n\n**Server:** Node, Express\n",
        ),
        SectionTemplate::new(
            "installation",
            "Installation",
            "## Installation\n\nInstall my-project with npm\n\n```bash\nnpm install my-project\ncd my-project\n```\n",
        ),
        SectionTemplate::new(
            "run-locally",
            "Run Locally",
            "## Run Locally\n\nClone the project\n\n```bash\ngit clone https://link-to-project\n```\n\n\
             Go to the project directory\n\n```bash\ncd my-project\n```\n\n\
             Install dependencies\n\n```bash\nnpm install\n```\n\n\
             Start the server\n\n```bash\nnpm run start\n```\n",
        ),
        SectionTemplate::new(
            "usage-examples",
            "Usage/Examples",
            "## Usage/Examples\n\n```javascript\nimport Component from 'my-project'\n\n\
             function App() {\n  return <Component />\n}\n```\n",
        ),
        SectionTemplate::new(
            "environment-variables",
            "Environment Variables",
            "## Environment Variables\n\nTo run this project, you will need to add the following \
             environment variables to your .env file\n\n`API_KEY`\n\n`ANOTHER_API_KEY`\n",
        ),
        SectionTemplate::new(
            "api-reference",
            "API Reference",
            "## API Reference\n\n#### Get all items\n\n```http\nGET /api/items\n```\n\n\
             | Parameter | Type     | Description                |\n\
             | :-------- | :------- | :------------------------- |\n\
             | `api_key` | `string` | **Required**. Your API key |\n\n\
             #### Get item\n\n```http\nGET /api/items/${id}\n```\n\n\
             | Parameter | Type     | Description                       |\n\
             | :-------- | :------- | :-------------------------------- |\n\
             | `id`      | `string` | **Required**. Id of item to fetch |\n",
        ),
        SectionTemplate::new(
            "running-tests",
            "Running Tests",
            "## Running Tests\n\nTo run tests, run the following command\n\n```bash\nnpm run test\n```\n",
        ),
        SectionTemplate::new(
            "deployment",
            "Deployment",
            "## Deployment\n\nTo deploy this project run\n\n```bash\nnpm run deploy\n```\n",
        ),
        SectionTemplate::new(
            "roadmap",
            "Roadmap",
            "## Roadmap\n\n- Additional browser support\n\n- Add more integrations\n",
        ),
        SectionTemplate::new(
            "faq",
            "FAQ",
            "## FAQ\n\n#### Question 1\n\nAnswer 1\n\n#### Question 2\n\nAnswer 2\n",
        ),
        SectionTemplate::new(
            "contributing",
            "Contributing",
            "## Contributing\n\nContributions are always welcome!\n\n\
             See `contributing.md` for ways to get started.\n\n\
             Please adhere to this project's `code of conduct`.\n",
        ),
        SectionTemplate::new(
            "authors",
            "Authors",
            "## Authors\n\n- [@octocat](https://www.github.com/octocat)\n",
        ),
        SectionTemplate::new(
            "acknowledgements",
            "Acknowledgements",
            "## Acknowledgements\n\n- [Awesome Readme Templates](https://awesomeopensource.com/project/elangosundar/awesome-README-templates)\n\
             - [Awesome README](https://github.com/matiassingers/awesome-readme)\n\
             - [How to write a Good readme](https://bulldogjob.com/news/449-how-to-write-a-good-readme-for-your-github-project)\n",
        ),
        SectionTemplate::new(
            "support",
            "Support",
            "## Support\n\nFor support, open an issue or reach out on the project chat.\n",
        ),
        SectionTemplate::new(
            "license",
            "License",
            "## License\n\n[MIT](https://choosealicense.com/licenses/mit/)\n",
        ),
    ]
}
