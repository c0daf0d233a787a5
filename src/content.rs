// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! Static marketing copy for the public pages.

/// A service tile. `features` is empty on the home-page preview.
#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

/// Titled paragraph used for values and selling points.
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
}

pub const HOME_SERVICES: [Service; 3] = [
    Service {
        icon: "💻",
        title: "Laptop Sales",
        description: "Premium quality laptops from leading brands at competitive prices.",
        features: &[],
    },
    Service {
        icon: "🔧",
        title: "Technical Support",
        description: "Expert repair, maintenance, and troubleshooting services.",
        features: &[],
    },
    Service {
        icon: "💡",
        title: "Consultation",
        description: "Professional guidance for choosing the right technology solutions.",
        features: &[],
    },
];

pub const HOME_REASONS: [&str; 6] = [
    "Over 12 years of experience in the tech industry",
    "Trusted by hundreds of businesses and individuals",
    "Certified technicians with expertise",
    "Quality products from authorized dealers",
    "Fast and reliable service delivery",
    "Competitive pricing and transparent quotes",
];

pub const SERVICES: [Service; 6] = [
    Service {
        icon: "🖥️",
        title: "Laptop Sales",
        description: "Premium quality laptops from leading brands including Dell, HP, Lenovo, Apple, and Asus at competitive prices.",
        features: &["Latest Models", "Authorized Dealers", "Warranty Support", "Flexible Payment"],
    },
    Service {
        icon: "🔧",
        title: "Hardware Repair",
        description: "Expert repair services for laptops, desktops, and peripherals with genuine spare parts.",
        features: &["Screen Replacement", "Battery Service", "Motherboard Repair", "Fast Turnaround"],
    },
    Service {
        icon: "💾",
        title: "Software Solutions",
        description: "OS installation, driver updates, antivirus setup, and performance optimization.",
        features: &["OS Installation", "Malware Removal", "Performance Tuning", "Data Recovery"],
    },
    Service {
        icon: "💡",
        title: "Technical Consultation",
        description: "Professional guidance for choosing the right technology solutions for your business or personal needs.",
        features: &["System Design", "Budget Planning", "Compatibility Check", "Future-Proof Solutions"],
    },
    Service {
        icon: "📋",
        title: "Maintenance Contracts",
        description: "Annual maintenance packages ensuring your systems run smoothly and efficiently.",
        features: &["Regular Checkups", "Priority Support", "24/7 Emergency", "Discounted Parts"],
    },
    Service {
        icon: "🔒",
        title: "Data Backup & Security",
        description: "Secure data backup solutions and cybersecurity implementation to protect your valuable information.",
        features: &["Cloud Backup", "Encryption", "Security Audit", "Disaster Recovery"],
    },
];

pub const SERVICE_STATS: [Stat; 4] = [
    Stat { label: "12+ Years", value: "Industry Experience" },
    Stat { label: "1000+", value: "Happy Customers" },
    Stat { label: "24/7", value: "Support Available" },
    Stat { label: "100%", value: "Satisfaction Guarantee" },
];

pub const STORY: [&str; 3] = [
    "Founded in 2013, MITC (Mateen IT Corp) started as a small laptop retail shop in Srinagar with a vision to provide quality technology solutions to the people of Kashmir.",
    "Over the years, we've grown to become Kashmir's most trusted technology partner, serving thousands of satisfied customers including individuals, small businesses, and large organizations.",
    "Today, we're proud to offer a comprehensive range of services from laptop sales to advanced technical support, all with the same passion and commitment we started with.",
];

pub const MISSION: &str = "To provide Kashmir with reliable, high-quality technology solutions and exceptional customer service that empowers businesses and individuals to achieve their goals.";

pub const VISION: &str = "To be the most trusted and preferred technology solutions provider in Kashmir, known for quality, integrity, and customer-centric approach.";

pub const VALUES: [Highlight; 4] = [
    Highlight {
        icon: "",
        title: "Integrity",
        description: "We believe in honest dealings and transparency in all our interactions.",
    },
    Highlight {
        icon: "",
        title: "Quality",
        description: "We never compromise on the quality of products and services we offer.",
    },
    Highlight {
        icon: "",
        title: "Innovation",
        description: "We stay updated with the latest technology trends and solutions.",
    },
    Highlight {
        icon: "",
        title: "Customer First",
        description: "Your satisfaction and trust are our top priorities.",
    },
];

pub const REASONS: [Highlight; 6] = [
    Highlight {
        icon: "🏆",
        title: "12+ Years Experience",
        description: "Over a decade of proven expertise in the technology industry.",
    },
    Highlight {
        icon: "👥",
        title: "1000+ Happy Clients",
        description: "Trusted by individuals and businesses across Kashmir.",
    },
    Highlight {
        icon: "🛠️",
        title: "Expert Team",
        description: "Certified technicians with professional training and certifications.",
    },
    Highlight {
        icon: "📦",
        title: "Authorized Dealers",
        description: "Original products from authorized distributors and manufacturers.",
    },
    Highlight {
        icon: "⚡",
        title: "Quick Turnaround",
        description: "Fast and efficient service delivery without compromising quality.",
    },
    Highlight {
        icon: "💰",
        title: "Best Prices",
        description: "Competitive pricing with transparent quotes and no hidden charges.",
    },
];

pub const TEAM: [TeamMember; 3] = [
    TeamMember { name: "Mateen Khan", role: "Founder & CEO" },
    TeamMember { name: "Ahmed Ali", role: "Technical Director" },
    TeamMember { name: "Fatima Malik", role: "Operations Manager" },
];

pub const LOCATION: &str = "Srinagar, Jammu & Kashmir";
