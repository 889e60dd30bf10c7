//! Static project showcase copy.

use serde::Serialize;

/// A titled paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub description: &'static str,
}

impl Section {
    const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// A titled group of sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub heading: &'static str,
    pub sections: &'static [Section],
}

/// Everything the showcase page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Showcase {
    pub hero_subtitle: &'static str,
    pub hero_title: &'static str,
    pub hero_description: &'static str,
    pub summary: &'static str,
    pub chapters: &'static [Chapter],
}

/// The project showcase.
pub const SHOWCASE: Showcase = Showcase {
    hero_subtitle: "A Project Showcase",
    hero_title: "A Quantum-Resistant Communication System Using Blockchain",
    hero_description: "Securing the next generation of digital communication against quantum \
        threats with a decentralized, end-to-end encrypted System.",
    summary: "The project proposes a quantum-resistant communication System built on a public \
        blockchain. It aims to provide secure, end-to-end encrypted messaging for the quantum \
        era. The core concept treats every message as a fully authenticated and encrypted \
        transaction. The System uses NIST-standardized Post-Quantum Cryptography (PQC) to \
        protect against both classical and quantum threats, ensuring privacy and integrity on \
        a scalable platform.",
    chapters: &[
        Chapter {
            heading: "Technical Approach",
            sections: &[
                Section::new(
                    "Language & Prototyping",
                    "The prototype is developed in Python for its extensive cryptographic \
                     libraries and rapid development capabilities.",
                ),
                Section::new(
                    "Core Cryptography",
                    "Built on the CRYSTALS (Cryptographic Suite for Algebraic Lattices) suite.",
                ),
                Section::new(
                    "Encryption",
                    "Uses CRYSTALS-Kyber for secure key encapsulation and message delivery.",
                ),
                Section::new(
                    "Authentication",
                    "Uses CRYSTALS-Dilithium for digital signatures to ensure authenticity, \
                     integrity, and non-repudiation.",
                ),
                Section::new(
                    "Consensus: Delegated Proof of Luck (DPoL)",
                    "A novel hybrid model that avoids the high energy use of PoW and mitigates \
                     centralization risks of PoS. Block producers are chosen via a verifiable, \
                     luck-based lottery.",
                ),
            ],
        },
        Chapter {
            heading: "System Flow",
            sections: &[
                Section::new("Sender", "Encrypts and signs a message, creating a transaction."),
                Section::new(
                    "Broadcast",
                    "The transaction is sent to the network's transaction pool.",
                ),
                Section::new("Validation", "A Validator Node processes the transaction."),
                Section::new("Consensus", "The transaction is recorded on the distributed ledger."),
                Section::new(
                    "Receiver",
                    "Retrieves the transaction and securely decrypts the message.",
                ),
            ],
        },
        Chapter {
            heading: "Impact",
            sections: &[
                Section::new(
                    "Economic",
                    "Protects cryptocurrencies and digital assets from quantum attacks. An \
                     estimated 25% of all Bitcoin is currently vulnerable.",
                ),
                Section::new(
                    "Social",
                    "Preserves long-term privacy by defeating \"Harvest Now, Decrypt Later\" \
                     strategies.",
                ),
                Section::new(
                    "Strategic",
                    "Provides a clear path for critical infrastructure to meet government \
                     mandates for migrating to PQC.",
                ),
            ],
        },
        Chapter {
            heading: "Challenges",
            sections: &[
                Section::new(
                    "Performance Cost (\"PQC Tax\")",
                    "Post-quantum algorithms come with performance overhead.",
                ),
                Section::new(
                    "Size Overhead",
                    "PQC signatures are significantly larger (~35x), increasing the on-chain \
                     data footprint.",
                ),
                Section::new(
                    "Throughput Reduction",
                    "Larger transaction sizes may reduce transactions per block by over 90%.",
                ),
                Section::new(
                    "Security Validation Risk",
                    "Validation must rely on theoretical analysis until large-scale quantum \
                     computers exist.",
                ),
            ],
        },
        Chapter {
            heading: "Future Scope",
            sections: &[
                Section::new(
                    "Scalability & Long-Term Vision",
                    "The ultimate goal is to develop a fully functional, public \
                     quantum-resistant blockchain, with the DPoL consensus mechanism designed \
                     for high speed and scalability.",
                ),
                Section::new(
                    "Performance Evaluation",
                    "Deploy the prototype in a simulated network to measure TPS, latency, and \
                     data overhead.",
                ),
                Section::new(
                    "Security Analysis",
                    "Conduct a rigorous theoretical review and System-level threat modeling.",
                ),
                Section::new(
                    "Adoption Strategy",
                    "Target enterprises and critical infrastructure sectors that are mandated \
                     to upgrade their security to PQC standards.",
                ),
            ],
        },
    ],
};

impl Showcase {
    /// Render the showcase as plain text, one paragraph per section.
    pub fn to_plain_text(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = write!(
            out,
            "{}\n\n{}\n\n{}\n\nAbstract\n\n{}\n",
            self.hero_subtitle, self.hero_title, self.hero_description, self.summary
        );
        for chapter in self.chapters {
            let _ = write!(out, "\n{}\n\n", chapter.heading);
            for section in chapter.sections {
                let _ = writeln!(out, "  {}: {}", section.title, section.description);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapters_are_populated() {
        assert_eq!(SHOWCASE.chapters.len(), 5);
        for chapter in SHOWCASE.chapters {
            assert!(!chapter.sections.is_empty(), "{} is empty", chapter.heading);
        }
    }

    #[test]
    fn test_plain_text_contains_every_heading() {
        let text = SHOWCASE.to_plain_text();
        assert!(text.starts_with("A Project Showcase"));
        for chapter in SHOWCASE.chapters {
            assert!(text.contains(chapter.heading));
        }
        assert!(text.contains("  Sender: Encrypts and signs a message"));
    }

    #[test]
    fn test_line_continuations_collapse_whitespace() {
        assert!(!SHOWCASE.summary.contains("  "));
        assert!(SHOWCASE.summary.contains("public blockchain"));
    }
}
