//! # SDS Assistant
//!
//! Safety data sheet ingestion and question answering over a local SQLite store.
//!
//! SDS Assistant ingests free-form safety-document text (PDF, DOCX, plain
//! text), extracts structured hazard records with pattern matching, and
//! answers natural-language questions about chemical hazards by combining
//! rule-based field extraction with lightweight lexical retrieval.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌──────────────┐
//! │ Files        │──▶│ Decode + Extract   │──▶│   SQLite     │
//! │ PDF/DOCX/TXT │   │ fields + sections │   │ docs+hazards │
//! └──────────────┘   └───────────────────┘   └──────┬───────┘
//!                                                   │
//!      question ──▶ classify ──▶ retrieve ──▶ select passage
//!                                                   │
//!                                             synthesize answer
//!                                                   │
//!                                   ┌───────────────┴──┐
//!                                   ▼                  ▼
//!                              ┌─────────┐       ┌──────────┐
//!                              │   CLI   │       │   HTTP   │
//!                              │  (sds)  │       │  (JSON)  │
//!                              └─────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sds init                          # create database
//! sds ingest ./sheets               # ingest a directory of SDS files
//! sds ask "What PPE is required?"   # answer a question
//! sds serve                         # start the JSON HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`decode`] | Binary-to-text decoding (PDF, DOCX, plain text) |
//! | [`fields`] | Pattern-based field extraction |
//! | [`sections`] | Named hazard-section excerpting |
//! | [`classify`] | Question-to-topic classification |
//! | [`retrieve`] | Candidate document retrieval |
//! | [`passage`] | Best-sentence passage selection |
//! | [`answer`] | Answer synthesis |
//! | [`ingest`] | Ingestion pipeline |
//! | [`ask`] | Question-answer orchestration |
//! | [`get`] | Document fetch and listing |
//! | [`locations`] | Location management |
//! | [`history`] | QA history log |
//! | [`stats`] | Database statistics |
//! | [`server`] | JSON HTTP server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod answer;
pub mod ask;
pub mod classify;
pub mod config;
pub mod db;
pub mod decode;
pub mod fields;
pub mod get;
pub mod history;
pub mod ingest;
pub mod locations;
pub mod migrate;
pub mod models;
pub mod passage;
pub mod retrieve;
pub mod sections;
pub mod server;
pub mod stats;
