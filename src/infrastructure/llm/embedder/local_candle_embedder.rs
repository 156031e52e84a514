use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{Encoding, PaddingParams, PaddingStrategy, Tokenizer};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

const EMBED_BATCH_SIZE: usize = 32;

/// Sentence embeddings from a BERT-family model on the Hugging Face Hub,
/// mean-pooled and L2-normalized. Inference runs on the blocking pool.
pub struct LocalCandleEmbedder {
    encoder: Arc<BertEncoder>,
}

struct BertEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    max_tokens: usize,
}

fn inference_error(e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

fn load_error(context: &str, e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::ModelLoadFailed(format!("{context}: {e}"))
}

impl LocalCandleEmbedder {
    /// Downloads (or reuses the cached copy of) `model_id` and loads it.
    /// Blocking; call from a blocking context.
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = Device::new_metal(0).unwrap_or(Device::Cpu);

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing local Candle embedding model"
        );

        let api = Api::new().map_err(|e| load_error("hub api", e))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let fetch = |file: &str| repo.get(file).map_err(|e| load_error(file, e));

        let config_path = fetch("config.json")?;
        let tokenizer_path = fetch("tokenizer.json")?;
        let weights_path = fetch("model.safetensors")?;

        let config_contents =
            std::fs::read_to_string(&config_path).map_err(|e| load_error("read config", e))?;
        let config: BertConfig =
            serde_json::from_str(&config_contents).map_err(|e| load_error("parse config", e))?;

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_error("tokenizer", e))?;
        // Overlong input is reported as an error instead of being cut short.
        tokenizer
            .with_truncation(None)
            .map_err(|e| load_error("truncation config", e))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        let dtype = if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| load_error("weights", e))?
        };

        let model = BertModel::load(vb, &config).map_err(|e| load_error("model", e))?;

        tracing::info!(
            max_tokens = config.max_position_embeddings,
            "Local Candle embedding model loaded"
        );

        Ok(Self {
            encoder: Arc::new(BertEncoder {
                model,
                tokenizer,
                device,
                max_tokens: config.max_position_embeddings,
            }),
        })
    }
}

impl BertEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| inference_error(format!("tokenization: {e}")))?;

        let longest = encodings
            .iter()
            .map(|e| e.get_attention_mask().iter().filter(|m| **m == 1).count())
            .max()
            .unwrap_or(0);
        if longest > self.max_tokens {
            return Err(EmbedderError::InputTooLong {
                tokens: longest,
                limit: self.max_tokens,
            });
        }

        let batch_size = encodings.len();
        let seq_len = encodings.first().map_or(0, |e| e.get_ids().len());
        let to_tensor = |select: fn(&Encoding) -> &[u32]| {
            let flat: Vec<u32> = encodings
                .iter()
                .flat_map(|e| select(e).iter().copied())
                .collect();
            Tensor::from_vec(flat, (batch_size, seq_len), &self.device).map_err(inference_error)
        };

        let input_ids = to_tensor(Encoding::get_ids)?;
        let token_type_ids = to_tensor(Encoding::get_type_ids)?;
        let attention_mask = to_tensor(Encoding::get_attention_mask)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(inference_error)?;

        // Mean over real tokens only.
        let mask = attention_mask
            .to_dtype(DType::F32)
            .and_then(|m| m.unsqueeze(2))
            .map_err(inference_error)?;
        let summed = hidden
            .broadcast_mul(&mask)
            .and_then(|t| t.sum(1))
            .map_err(inference_error)?;
        let token_counts = mask.sum(1).map_err(inference_error)?;
        let pooled = summed
            .broadcast_div(&token_counts)
            .map_err(inference_error)?;

        let rows = pooled.to_vec2::<f32>().map_err(inference_error)?;
        Ok(rows
            .into_iter()
            .map(|mut row| {
                l2_normalize(&mut row);
                row
            })
            .collect())
    }
}

fn l2_normalize(v: &mut [f32]) {
    let length: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if length > 0.0 {
        v.iter_mut().for_each(|x| *x /= length);
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.embed_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encoder = Arc::clone(&self.encoder);
        let owned: Vec<String> = texts.iter().map(|t| (*t).to_string()).collect();

        let vectors = tokio::task::spawn_blocking(move || {
            let mut vectors = Vec::with_capacity(owned.len());
            for batch in owned.chunks(EMBED_BATCH_SIZE) {
                vectors.extend(encoder.encode(batch)?);
            }
            Ok::<_, EmbedderError>(vectors)
        })
        .await
        .map_err(|e| EmbedderError::InferenceFailed(format!("task join error: {e}")))??;

        Ok(vectors.into_iter().map(Embedding::new).collect())
    }
}
