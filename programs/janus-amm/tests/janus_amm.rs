use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::token::spl_token;
use solana_program_test::*;
use solana_sdk::{
    account::Account,
    compute_budget::ComputeBudgetInstruction,
    instruction::Instruction,
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
    transaction::Transaction,
};

// Wrapper matching solana's `ProcessInstruction` signature. Anchor 0.29's
// generated `entry` ties the accounts slice and its `AccountInfo` contents to a
// single lifetime, which cannot coerce to the fully-generic fn pointer that
// `processor!` expects. `builtin_process_instruction` always passes a single
// local `Vec<AccountInfo>`, so laundering the lifetimes here is sound.
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[anchor_lang::solana_program::account_info::AccountInfo],
    instruction_data: &[u8],
) -> anchor_lang::solana_program::entrypoint::ProgramResult {
    let accounts = unsafe {
        core::mem::transmute::<
            &[anchor_lang::solana_program::account_info::AccountInfo],
            &[anchor_lang::solana_program::account_info::AccountInfo],
        >(accounts)
    };
    janus_amm::entry(program_id, accounts, instruction_data)
}

fn add_mint(program_test: &mut ProgramTest, mint: Pubkey, decimals: u8, authority: &Pubkey) {
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    spl_token::state::Mint {
        mint_authority: COption::Some(*authority),
        supply: 0,
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    }
    .pack_into_slice(&mut data);
    program_test.add_account(
        mint,
        Account {
            lamports: 1_000_000_000,
            data,
            owner: spl_token::id(),
            ..Account::default()
        },
    );
}

#[tokio::test]
async fn factory_and_pair_lifecycle() {
    let program_id = janus_amm::id();
    let mut program_test = ProgramTest::new("janus_amm", program_id, processor!(process_instruction));

    // Two ordered token mints for the pair
    let mut mints = [Pubkey::new_unique(), Pubkey::new_unique()];
    mints.sort();
    let [token0, token1] = mints;
    let mint_authority = Pubkey::new_unique();
    add_mint(&mut program_test, token0, 9, &mint_authority);
    add_mint(&mut program_test, token1, 6, &mint_authority);

    let (mut banks_client, payer, recent_blockhash) = program_test.start().await;

    let (factory, _) = Pubkey::find_program_address(&[b"factory"], &program_id);

    // Initialize the factory
    let ix = Instruction {
        program_id,
        accounts: janus_amm::accounts::InitializeFactory {
            factory,
            payer: payer.pubkey(),
            system_program: system_program::id(),
        }
        .to_account_metas(None),
        data: janus_amm::instruction::InitializeFactory {
            owner: payer.pubkey(),
        }
        .data(),
    };
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        &[&payer],
        recent_blockhash,
    );
    banks_client.process_transaction(tx).await.unwrap();

    let account = banks_client.get_account(factory).await.unwrap().unwrap();
    let state = janus_amm::state::Factory::try_deserialize(&mut account.data.as_slice()).unwrap();
    assert_eq!(state.owner, payer.pubkey());
    assert_eq!(state.fee_to, Pubkey::default());
    assert_eq!(state.owner_fee_share, 50_000);
    assert_eq!(state.pair_count, 0);

    // A non-owner must not be able to reconfigure the beneficiary
    let mallory = Keypair::new();
    let ix = Instruction {
        program_id,
        accounts: janus_amm::accounts::ConfigureFactory {
            factory,
            owner: mallory.pubkey(),
        }
        .to_account_metas(None),
        data: janus_amm::instruction::SetFeeTo {
            new_fee_to: mallory.pubkey(),
        }
        .data(),
    };
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        &[&payer, &mallory],
        recent_blockhash,
    );
    assert!(banks_client.process_transaction(tx).await.is_err());

    // The owner can
    let fee_to = Pubkey::new_unique();
    let set_fee_to = Instruction {
        program_id,
        accounts: janus_amm::accounts::ConfigureFactory {
            factory,
            owner: payer.pubkey(),
        }
        .to_account_metas(None),
        data: janus_amm::instruction::SetFeeTo { new_fee_to: fee_to }.data(),
    };
    let set_share = Instruction {
        program_id,
        accounts: janus_amm::accounts::ConfigureFactory {
            factory,
            owner: payer.pubkey(),
        }
        .to_account_metas(None),
        data: janus_amm::instruction::SetOwnerFeeShare { new_share: 16_666 }.data(),
    };
    let tx = Transaction::new_signed_with_payer(
        &[set_fee_to, set_share],
        Some(&payer.pubkey()),
        &[&payer],
        recent_blockhash,
    );
    banks_client.process_transaction(tx).await.unwrap();

    let account = banks_client.get_account(factory).await.unwrap().unwrap();
    let state = janus_amm::state::Factory::try_deserialize(&mut account.data.as_slice()).unwrap();
    assert_eq!(state.fee_to, fee_to);
    assert_eq!(state.owner_fee_share, 16_666);

    // Create the pair with all of its derived accounts
    let (pair, _) = Pubkey::find_program_address(
        &[b"pair", token0.as_ref(), token1.as_ref()],
        &program_id,
    );
    let (lp_mint, _) = Pubkey::find_program_address(&[b"lp_mint", pair.as_ref()], &program_id);
    let (reserve0_vault, _) = Pubkey::find_program_address(
        &[b"reserve_vault", pair.as_ref(), token0.as_ref()],
        &program_id,
    );
    let (reserve1_vault, _) = Pubkey::find_program_address(
        &[b"reserve_vault", pair.as_ref(), token1.as_ref()],
        &program_id,
    );
    let (lp_vault, _) = Pubkey::find_program_address(&[b"lp_vault", pair.as_ref()], &program_id);
    let (locked_liquidity, _) =
        Pubkey::find_program_address(&[b"locked_liquidity", pair.as_ref()], &program_id);

    let ix = Instruction {
        program_id,
        accounts: janus_amm::accounts::CreatePair {
            factory,
            token0_mint: token0,
            token1_mint: token1,
            pair,
            lp_mint,
            reserve0_vault,
            reserve1_vault,
            lp_vault,
            locked_liquidity,
            payer: payer.pubkey(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
        }
        .to_account_metas(None),
        data: janus_amm::instruction::CreatePair {}.data(),
    };
    // pair creation initializes six accounts in one instruction
    let tx = Transaction::new_signed_with_payer(
        &[ComputeBudgetInstruction::set_compute_unit_limit(400_000), ix],
        Some(&payer.pubkey()),
        &[&payer],
        recent_blockhash,
    );
    banks_client.process_transaction(tx).await.unwrap();

    let account = banks_client.get_account(pair).await.unwrap().unwrap();
    let state = janus_amm::state::Pair::try_deserialize(&mut account.data.as_slice()).unwrap();
    assert_eq!(state.token0, token0);
    assert_eq!(state.token1, token1);
    assert_eq!(state.lp_mint, lp_mint);
    assert_eq!(state.reserve0, 0);
    assert_eq!(state.reserve1, 0);
    assert_eq!(state.total_supply, 0);
    assert_eq!(state.fee_percent0, 300);
    assert_eq!(state.fee_percent1, 300);
    assert!(!state.stable_swap);
    assert_eq!(state.precision_multiplier0, 1_000_000_000);
    assert_eq!(state.precision_multiplier1, 1_000_000);

    let factory_account = banks_client.get_account(factory).await.unwrap().unwrap();
    let factory_state =
        janus_amm::state::Factory::try_deserialize(&mut factory_account.data.as_slice()).unwrap();
    assert_eq!(factory_state.pair_count, 1);
    assert_eq!(factory_state.all_pairs, vec![pair]);

    // The LP mint is program-controlled
    let lp_mint_account = banks_client.get_account(lp_mint).await.unwrap().unwrap();
    let lp_mint_state = spl_token::state::Mint::unpack(&lp_mint_account.data).unwrap();
    assert_eq!(lp_mint_state.mint_authority, COption::Some(pair));
    assert_eq!(lp_mint_state.supply, 0);
    assert_eq!(lp_mint_state.decimals, 9);
}
